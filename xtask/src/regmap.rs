use colored::Colorize;
use ess9038pro::access::{access_mode, AccessMode};
use ess9038pro::config::REGMAP_CONFIG;
use ess9038pro::registers::Register;
use ess9038pro::Control;
use platform::control::{ControlInfo, ControlKind};

/// Print the register map, access modes and the control surface.
pub fn run(all: bool) {
    println!();
    println!("{}", "📋 ES9038PRO register map".cyan().bold());
    println!(
        "   {}",
        format!(
            "{}-bit addresses, {}-bit values, max register {}, cache {:?}",
            REGMAP_CONFIG.reg_bits,
            REGMAP_CONFIG.val_bits,
            REGMAP_CONFIG.max_register,
            REGMAP_CONFIG.cache_type
        )
        .dimmed()
    );
    println!();

    for reg in Register::ALL {
        let mode = access_mode(reg.addr());
        if mode == AccessMode::None && !all {
            continue;
        }
        let label = mode_label(mode);
        println!("  {:>3}  {:<10} {}", reg.addr(), label, reg.name());
    }
    println!();

    println!("{}", "🎛  Controls".cyan().bold());
    for control in Control::ALL {
        let descriptor = control.descriptor();
        let reg = match descriptor.kind {
            ControlKind::Range { field, .. } => field.reg,
            ControlKind::Enum(field) | ControlKind::EnumExt(field) => field.reg,
        };
        let detail = match control.info() {
            ControlInfo::Integer { min, max, .. } => format!("reg {reg:>3}  range {min}..={max}"),
            ControlInfo::Enumerated { items } => format!("reg {reg:>3}  {} items", items.len()),
        };
        println!("  {:<24} {}", descriptor.name, detail.dimmed());
    }
    println!();
}

fn mode_label(mode: AccessMode) -> colored::ColoredString {
    match mode {
        AccessMode::Writable => "writable".green(),
        AccessMode::Cached => "read-only".yellow(),
        AccessMode::Volatile => "volatile".magenta(),
        AccessMode::None => "none".dimmed(),
    }
}
