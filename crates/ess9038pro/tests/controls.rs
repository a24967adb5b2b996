//! Mixer controls against an emulated chip and exact bus traces.

#![allow(clippy::unwrap_used, clippy::panic)]

use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};
use ess9038pro::registers::Register;
use ess9038pro::{Control, Ess9038pro};
use platform::control::{ControlError, ControlInfo, ControlValue};
use platform::mocks::{FakeGpio, FakePin, FakeRegisterFile, RecordingHost};

const ADDR: u8 = 0x48;

type Dac = Ess9038pro<FakeRegisterFile, FakePin>;

fn probe(chip: FakeRegisterFile) -> Dac {
    Ess9038pro::probe(chip, &mut FakeGpio::empty(), &mut RecordingHost::new()).unwrap()
}

fn probe_mock(i2c: I2cMock) -> Ess9038pro<I2cMock, FakePin> {
    Ess9038pro::probe(i2c, &mut FakeGpio::empty(), &mut RecordingHost::new()).unwrap()
}

fn chip_with(reg: Register, value: u8) -> FakeRegisterFile {
    let mut chip = FakeRegisterFile::new(ADDR);
    chip.set_register(reg.addr(), value);
    chip
}

fn registers(dac: Dac, host: &mut RecordingHost) -> FakeRegisterFile {
    dac.remove(host).0
}

// ── Volume ───────────────────────────────────────────────────────────────────

#[test]
fn volume_round_trips_over_full_range() {
    let mut dac = probe(FakeRegisterFile::new(ADDR));
    for v in 0..=100 {
        dac.set_volume(v).unwrap();
        assert_eq!(dac.volume().unwrap(), v);
    }
}

#[test]
fn volume_register_holds_attenuation() {
    let mut dac = probe(FakeRegisterFile::new(ADDR));
    dac.control_put(Control::Volume, ControlValue::Integer(100))
        .unwrap();
    dac.control_put(Control::Volume, ControlValue::Integer(30))
        .unwrap();
    let chip = registers(dac, &mut RecordingHost::new());
    assert_eq!(chip.register(Register::Volume1.addr()), 70);
    // Control value 100 is register 0, which equals the power-on value:
    // no write for it.
    assert_eq!(chip.writes(), &[(16, 70)]);
}

#[test]
fn volume_out_of_range_is_rejected_without_traffic() {
    let mut dac = probe(FakeRegisterFile::new(ADDR));
    assert_eq!(
        dac.set_volume(101),
        Err(ControlError::OutOfRange {
            value: 101,
            min: 0,
            max: 100
        })
    );
    assert!(dac.set_volume(-1).is_err());
    let chip = registers(dac, &mut RecordingHost::new());
    assert_eq!(chip.read_count(), 0);
    assert!(chip.writes().is_empty());
}

#[test]
fn volume_put_is_read_modify_write_on_the_bus() {
    let mut i2c = I2cMock::new(&[
        I2cTransaction::write_read(ADDR, vec![16], vec![0x80]),
        I2cTransaction::write(ADDR, vec![16, 0x80 | 50]),
    ]);
    let mut dac = probe_mock(i2c.clone());
    dac.set_volume(50).unwrap();
    // Served from the cache.
    assert_eq!(dac.volume().unwrap(), 50);
    i2c.done();
}

// ── Filters ──────────────────────────────────────────────────────────────────

#[test]
fn fir_filter_uses_bits_7_to_5_only() {
    let mut dac = probe(chip_with(Register::FilterAndMute, 0b0000_0111));
    dac.control_put(Control::FirFilter, ControlValue::Enumerated(7))
        .unwrap();
    assert_eq!(
        dac.control_get(Control::FirFilter).unwrap(),
        ControlValue::Enumerated(7)
    );
    let chip = registers(dac, &mut RecordingHost::new());
    assert_eq!(chip.register(7), 0b1110_0111);
}

#[test]
fn iir_filter_uses_bits_2_to_1_only() {
    let mut dac = probe(chip_with(Register::FilterAndMute, 0b1110_0001));
    dac.control_put(Control::IirFilter, ControlValue::Enumerated(2))
        .unwrap();
    assert_eq!(
        dac.control_get(Control::IirFilter).unwrap(),
        ControlValue::Enumerated(2)
    );
    let chip = registers(dac, &mut RecordingHost::new());
    assert_eq!(chip.register(7), 0b1110_0101);
}

#[test]
fn filter_item_past_table_is_rejected() {
    let mut dac = probe(FakeRegisterFile::new(ADDR));
    assert_eq!(
        dac.control_put(Control::IirFilter, ControlValue::Enumerated(4)),
        Err(ControlError::InvalidItem { item: 4, items: 4 })
    );
    assert_eq!(
        dac.control_put(Control::FirFilter, ControlValue::Enumerated(8)),
        Err(ControlError::InvalidItem { item: 8, items: 8 })
    );
}

// ── Input select ─────────────────────────────────────────────────────────────

#[test]
fn input_select_writes_all_four_channel_maps_in_order() {
    let mut dac = probe(FakeRegisterFile::new(ADDR));
    dac.control_put(Control::InputSelect, ControlValue::Enumerated(2))
        .unwrap();
    assert_eq!(
        dac.control_get(Control::InputSelect).unwrap(),
        ControlValue::Enumerated(2)
    );
    let chip = registers(dac, &mut RecordingHost::new());
    assert_eq!(
        chip.writes(),
        &[(38, 0x54), (39, 0x54), (40, 0x54), (41, 0x54)]
    );
}

#[test]
fn input_select_reports_first_pair_only() {
    let mut chip = chip_with(Register::ChannelMap12, 0x32);
    chip.set_register(Register::ChannelMap34.addr(), 0x76);
    let mut dac = probe(chip);
    assert_eq!(dac.selected_input().unwrap(), 1);
}

#[test]
fn input_select_partial_failure_is_not_rolled_back() {
    let mut chip = FakeRegisterFile::new(ADDR);
    chip.fail_writes_after(2);
    let mut dac = probe(chip);

    let err = dac.select_input(3).unwrap_err();
    assert!(matches!(err, ControlError::Register(_)));

    let chip = registers(dac, &mut RecordingHost::new());
    assert_eq!(chip.register(38), 0x76);
    assert_eq!(chip.register(39), 0x76);
    assert_eq!(chip.register(40), 0x00);
    assert_eq!(chip.register(41), 0x00);
}

#[test]
fn input_select_out_of_range_writes_nothing() {
    let mut dac = probe(FakeRegisterFile::new(ADDR));
    assert_eq!(
        dac.select_input(4),
        Err(ControlError::InvalidItem { item: 4, items: 4 })
    );
    let chip = registers(dac, &mut RecordingHost::new());
    assert!(chip.writes().is_empty());
    assert_eq!(chip.read_count(), 0);
}

// ── Dispatch ─────────────────────────────────────────────────────────────────

#[test]
fn wrong_value_shape_is_type_mismatch() {
    let mut dac = probe(FakeRegisterFile::new(ADDR));
    assert_eq!(
        dac.control_put(Control::Volume, ControlValue::Enumerated(1)),
        Err(ControlError::TypeMismatch)
    );
    assert_eq!(
        dac.control_put(Control::InputSelect, ControlValue::Integer(1)),
        Err(ControlError::TypeMismatch)
    );
}

#[test]
fn control_info_by_name() {
    let dac = probe(FakeRegisterFile::new(ADDR));
    let fir = Control::from_name("FIR Filter Type").unwrap();
    match dac.control_info(fir) {
        ControlInfo::Enumerated { items } => {
            assert_eq!(items.len(), 8);
            assert_eq!(items.first(), Some(&"fast roll-off, linear"));
            assert_eq!(items.last(), Some(&"brickwall"));
        }
        other @ ControlInfo::Integer { .. } => panic!("unexpected {other:?}"),
    }
}
