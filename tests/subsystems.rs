//! Wrapper-level behavior against a scripted link: official short-form
//! command text going out, typed values coming back, and validation
//! failing before anything is written.

use std::collections::VecDeque;

use bytes::Bytes;
use scpilink::scpi::{block, error::ScpiError, ScpiLink};
use scpilink::subsystems::{
    calculate::TraceFormat,
    calibration::{CalAuto, CalDate},
    display::Color,
    input::{InputCoupling, Polarity},
    memory::MemoryKind,
    status::StatusBranch,
};
use scpilink::Instrument;

/// Records every outgoing command and replays canned responses.
#[derive(Default)]
struct FakeLink {
    sent: Vec<String>,
    blocks: Vec<(String, Vec<u8>)>,
    replies: VecDeque<String>,
}

impl FakeLink {
    fn replying(replies: &[&str]) -> Self {
        Self {
            replies: replies.iter().map(|r| format!("{}\n", r)).collect(),
            ..Self::default()
        }
    }
}

impl ScpiLink for FakeLink {
    fn scpi_write(&mut self, command: &str) -> Result<(), ScpiError> {
        self.sent.push(command.to_string());
        Ok(())
    }

    fn scpi_query(&mut self, command: &str) -> Result<String, ScpiError> {
        self.sent.push(command.to_string());
        self.replies
            .pop_front()
            .ok_or_else(|| ScpiError::Block("test script ran out of replies"))
    }

    fn scpi_write_block(&mut self, command: &str, data: &[u8]) -> Result<(), ScpiError> {
        self.blocks.push((command.to_string(), data.to_vec()));
        Ok(())
    }

    fn scpi_query_block(&mut self, command: &str) -> Result<Bytes, ScpiError> {
        let resp = self.scpi_query(command)?;
        block::decode(resp.as_bytes())
    }
}

#[test]
fn identity_splits_idn_fields() {
    let link = FakeLink::replying(&["Keysight Technologies,34465A,MY57501234,A.03.00-02.40"]);
    let mut inst = Instrument::new(link);
    let id = inst.identity().unwrap();
    assert_eq!(id.manufacturer, "Keysight Technologies");
    assert_eq!(id.model, "34465A");
    assert_eq!(id.serial_number, "MY57501234");
    assert_eq!(id.firmware, "A.03.00-02.40");
    assert_eq!(inst.into_inner().sent, vec!["*IDN?"]);
}

#[test]
fn common_commands_use_star_forms() {
    let link = FakeLink::replying(&["+0", "+48"]);
    let mut inst = Instrument::new(link);
    inst.reset().unwrap();
    inst.clear_status().unwrap();
    assert_eq!(inst.self_test().unwrap(), 0);
    let stb = inst.status_byte().unwrap();
    assert!(stb.message_available());
    assert!(stb.event_summary());
    inst.set_service_mask(Default::default()).unwrap();
    assert_eq!(
        inst.into_inner().sent,
        vec!["*RST", "*CLS", "*TST?", "*STB?", "*SRE 0"]
    );
}

#[test]
fn calculate_formats_use_official_abbreviations() {
    let link = FakeLink::replying(&["MLOG", "GDEL"]);
    let mut inst = Instrument::new(link);
    let mut calc = inst.calculate();
    calc.set_format(TraceFormat::MagnitudeLog).unwrap();
    assert_eq!(calc.get_format().unwrap(), TraceFormat::MagnitudeLog);
    assert_eq!(calc.get_format().unwrap(), TraceFormat::GroupDelay);
    calc.set_average_count(256).unwrap();
    calc.set_smoothing_aperture(1.5).unwrap();
    assert_eq!(
        inst.into_inner().sent,
        vec![
            ":CALC:FORM MLOG",
            ":CALC:FORM?",
            ":CALC:FORM?",
            ":CALC:AVER:COUN 256",
            ":CALC:SMO:APER 1.5",
        ]
    );
}

#[test]
fn calculate_normalizes_long_form_responses() {
    let link = FakeLink::replying(&["mlogarithmic", "PHASE"]);
    let mut inst = Instrument::new(link);
    let mut calc = inst.calculate();
    assert_eq!(calc.get_format().unwrap(), TraceFormat::MagnitudeLog);
    assert_eq!(calc.get_format().unwrap(), TraceFormat::Phase);
}

#[test]
fn calculate_rejects_out_of_range_before_io() {
    let mut inst = Instrument::new(FakeLink::default());
    let mut calc = inst.calculate();
    assert!(matches!(
        calc.set_average_count(0),
        Err(ScpiError::OutOfRange { .. })
    ));
    assert!(matches!(
        calc.set_average_count(1000),
        Err(ScpiError::OutOfRange { .. })
    ));
    assert!(matches!(
        calc.set_smoothing_aperture(30.0),
        Err(ScpiError::OutOfRange { .. })
    ));
    assert!(matches!(
        calc.set_limit_upper(f64::NAN),
        Err(ScpiError::InvalidArgument { .. })
    ));
    assert!(inst.into_inner().sent.is_empty());
}

#[test]
fn input_setters_and_synonyms() {
    let link = FakeLink::replying(&["GROUND", "INVERTED", "+5.0E+01"]);
    let mut inst = Instrument::new(link);
    let mut input = inst.input();
    input.set_coupling(InputCoupling::Ground).unwrap();
    assert_eq!(input.get_coupling().unwrap(), InputCoupling::Ground);
    assert_eq!(input.get_polarity().unwrap(), Polarity::Inverted);
    assert_eq!(input.get_impedance().unwrap(), 50.0);
    input.set_attenuation(10.0).unwrap();
    input.set_gain(-20.0).unwrap();
    assert_eq!(
        inst.into_inner().sent,
        vec![
            ":INP:COUP GND",
            ":INP:COUP?",
            ":INP:POL?",
            ":INP:IMP?",
            ":INP:ATT 10",
            ":INP:GAIN -20",
        ]
    );
}

#[test]
fn input_rejects_bad_levels_before_io() {
    let mut inst = Instrument::new(FakeLink::default());
    let mut input = inst.input();
    assert!(input.set_impedance(600.0).is_err());
    assert!(input.set_attenuation(71.0).is_err());
    assert!(input.set_gain(20.5).is_err());
    assert!(input.set_filter_frequency(0.0).is_err());
    assert!(inst.into_inner().sent.is_empty());
}

#[test]
fn memory_catalog_parses_quoted_records() {
    let link = FakeLink::replying(&[
        "1024,7168,\"STATE1,STAT,128\",\"CAL_TBL,TABL,512\"",
    ]);
    let mut inst = Instrument::new(link);
    let cat = inst.memory().catalog().unwrap();
    assert_eq!(cat.bytes_used, 1024);
    assert_eq!(cat.bytes_free, 7168);
    assert_eq!(cat.entries.len(), 2);
    assert_eq!(cat.entries[0].name, "STATE1");
    assert_eq!(cat.entries[0].kind, "STAT");
    assert_eq!(cat.entries[0].size, 128);
    assert_eq!(cat.entries[1].name, "CAL_TBL");
    assert_eq!(cat.entries[1].size, 512);
}

#[test]
fn memory_free_and_state_names() {
    let link = FakeLink::replying(&["6144,2048", "8192,0", "\"LIMIT_SETUP\""]);
    let mut inst = Instrument::new(link);
    let mut mem = inst.memory();
    assert_eq!(mem.free(MemoryKind::State).unwrap(), (6144, 2048));
    assert_eq!(mem.free(MemoryKind::Macro).unwrap(), (8192, 0));
    mem.set_state_name(3, "LIMIT_SETUP").unwrap();
    assert_eq!(mem.get_state_name(3).unwrap(), "LIMIT_SETUP");
    assert_eq!(
        inst.into_inner().sent,
        vec![
            ":MEM:FREE:STAT?",
            ":MEM:FREE:MACR?",
            ":MEM:STAT:NAME 3,\"LIMIT_SETUP\"",
            ":MEM:STAT:NAME? 3",
        ]
    );
}

#[test]
fn memory_rejects_bad_register_and_names_before_io() {
    let mut inst = Instrument::new(FakeLink::default());
    let mut mem = inst.memory();
    assert!(mem.set_state_name(10, "X").is_err());
    assert!(mem.set_state_name(1, "").is_err());
    assert!(mem.set_state_name(1, "A,B").is_err());
    assert!(mem.set_data("bad\"name", b"x").is_err());
    let link = inst.into_inner();
    assert!(link.sent.is_empty());
    assert!(link.blocks.is_empty());
}

#[test]
fn memory_data_round_trips_block_framing() {
    let link = FakeLink::replying(&["#15hello"]);
    let mut inst = Instrument::new(link);
    let mut mem = inst.memory();
    mem.set_data("CAL_1", &[0, 1, 2, 254, 255]).unwrap();
    assert_eq!(&mem.get_data("CAL_1").unwrap()[..], b"hello");
    let link = inst.into_inner();
    assert_eq!(link.blocks.len(), 1);
    assert_eq!(link.blocks[0].0, ":MEM:DATA \"CAL_1\"");
    assert_eq!(link.blocks[0].1, vec![0, 1, 2, 254, 255]);
    assert_eq!(link.sent, vec![":MEM:DATA? \"CAL_1\""]);
}

#[test]
fn calibration_date_and_secure() {
    let link = FakeLink::replying(&["+0", "2024,6,1", "ONCE"]);
    let mut inst = Instrument::new(link);
    let mut cal = inst.calibration();
    assert_eq!(cal.run_all().unwrap(), 0);
    cal.set_date(CalDate {
        year: 2024,
        month: 6,
        day: 1,
    })
    .unwrap();
    assert_eq!(
        cal.get_date().unwrap(),
        CalDate {
            year: 2024,
            month: 6,
            day: 1
        }
    );
    cal.set_secure_state(true, "CAL_2024").unwrap();
    assert_eq!(cal.get_auto().unwrap(), CalAuto::Once);
    assert_eq!(
        inst.into_inner().sent,
        vec![
            ":CAL:ALL?",
            ":CAL:DATE 2024,6,1",
            ":CAL:DATE?",
            ":CAL:SEC:STAT ON,\"CAL_2024\"",
            ":CAL:AUTO?",
        ]
    );
}

#[test]
fn calibration_rejects_bad_dates_and_codes_before_io() {
    let mut inst = Instrument::new(FakeLink::default());
    let mut cal = inst.calibration();
    assert!(cal
        .set_date(CalDate {
            year: 2024,
            month: 13,
            day: 1
        })
        .is_err());
    assert!(cal
        .set_date(CalDate {
            year: 1980,
            month: 6,
            day: 1
        })
        .is_err());
    assert!(cal.set_secure_state(true, "").is_err());
    assert!(cal.set_secure_code("has spaces!").is_err());
    assert!(inst.into_inner().sent.is_empty());
}

#[test]
fn trace_points_and_values() {
    let link = FakeLink::replying(&["+2001", "1.0,-2.5,+3.0E+00"]);
    let mut inst = Instrument::new(link);
    let mut trace = inst.trace();
    trace.set_points("TRACE1", 2001).unwrap();
    assert_eq!(trace.get_points("TRACE1").unwrap(), 2001);
    trace.set_values("TRACE1", &[1.0, -2.5]).unwrap();
    assert_eq!(trace.get_values("TRACE1").unwrap(), vec![1.0, -2.5, 3.0]);
    trace.copy("TRACE2", "TRACE1").unwrap();
    assert_eq!(
        inst.into_inner().sent,
        vec![
            ":TRAC:POIN \"TRACE1\",2001",
            ":TRAC:POIN? \"TRACE1\"",
            ":TRAC:DATA \"TRACE1\",1,-2.5",
            ":TRAC:DATA? \"TRACE1\"",
            ":TRAC:COPY \"TRACE2\",\"TRACE1\"",
        ]
    );
}

#[test]
fn trace_rejects_zero_points_before_io() {
    let mut inst = Instrument::new(FakeLink::default());
    let mut trace = inst.trace();
    assert!(matches!(
        trace.set_points("TRACE1", 0),
        Err(ScpiError::OutOfRange { .. })
    ));
    assert!(trace.set_values("TRACE1", &[]).is_err());
    assert!(trace.set_values("TRACE1", &[1.0, f64::INFINITY]).is_err());
    assert!(inst.into_inner().sent.is_empty());
}

#[test]
fn trace_catalog_strips_quotes_and_placeholder() {
    let link = FakeLink::replying(&["\"TRACE1\",\"ACQ_REF\"", "NONE"]);
    let mut inst = Instrument::new(link);
    let mut trace = inst.trace();
    assert_eq!(trace.catalog().unwrap(), vec!["TRACE1", "ACQ_REF"]);
    assert!(trace.catalog().unwrap().is_empty());
}

#[test]
fn status_branches_and_queue() {
    let link = FakeLink::replying(&["+514", "-113,\"Undefined header\"", "0,\"No error\""]);
    let mut inst = Instrument::new(link);
    let mut status = inst.status();
    assert_eq!(status.condition(StatusBranch::Operation).unwrap(), 514);
    status.set_enable(StatusBranch::Questionable, 0x0100).unwrap();
    status
        .set_positive_transition(StatusBranch::Operation, 0x4000)
        .unwrap();
    status
        .set_negative_transition(StatusBranch::Questionable, 0x0002)
        .unwrap();
    status.preset().unwrap();
    let entry = status.next_queue_entry().unwrap().unwrap();
    assert_eq!(entry.code, -113);
    assert_eq!(entry.message, "Undefined header");
    assert!(status.next_queue_entry().unwrap().is_none());
    assert_eq!(
        inst.into_inner().sent,
        vec![
            ":STAT:OPER:COND?",
            ":STAT:QUES:ENAB 256",
            ":STAT:OPER:PTR 16384",
            ":STAT:QUES:NTR 2",
            ":STAT:PRES",
            ":STAT:QUE?",
            ":STAT:QUE?",
        ]
    );
}

#[test]
fn display_color_components_validated_before_io() {
    let mut inst = Instrument::new(FakeLink::default());
    let mut display = inst.display();
    assert!(display
        .set_color(Color {
            hue: 1.2,
            saturation: 0.5,
            luminance: 0.5
        })
        .is_err());
    assert!(display.set_brightness(-0.1).is_err());
    assert!(display.set_contrast(1.01).is_err());
    assert!(inst.into_inner().sent.is_empty());
}

#[test]
fn display_formats_hsl_and_text() {
    let link = FakeLink::replying(&["0.1,0.9,0.4"]);
    let mut inst = Instrument::new(link);
    let mut display = inst.display();
    display
        .set_color(Color {
            hue: 0.1,
            saturation: 0.9,
            luminance: 0.4,
        })
        .unwrap();
    let color = display.get_color().unwrap();
    assert_eq!(color.hue, 0.1);
    assert_eq!(color.luminance, 0.4);
    display.set_text("RUN 42").unwrap();
    display.clear_text().unwrap();
    assert_eq!(
        inst.into_inner().sent,
        vec![
            ":DISP:COL:HSL 0.1,0.9,0.4",
            ":DISP:COL:HSL?",
            ":DISP:TEXT \"RUN 42\"",
            ":DISP:TEXT:CLE",
        ]
    );
}

#[test]
fn vxi_roster_and_registers() {
    let link = FakeLink::replying(&["+3", "0,8,24", "24,-1,4095,20993,\"DIGITIZER\"", "+513"]);
    let mut inst = Instrument::new(link);
    let mut vxi = inst.vxi();
    assert_eq!(vxi.device_count().unwrap(), 3);
    assert_eq!(vxi.device_numbers().unwrap(), vec![0, 8, 24]);
    let info = vxi.device_info(24).unwrap();
    assert_eq!(info.logical_address, 24);
    assert_eq!(info.commander_address, -1);
    assert_eq!(info.device_class, "DIGITIZER");
    vxi.select(24).unwrap();
    vxi.write_register(8, 0x8000).unwrap();
    assert_eq!(vxi.read_register(8).unwrap(), 513);
    assert_eq!(
        inst.into_inner().sent,
        vec![
            ":VXI:CONF:NUM?",
            ":VXI:CONF:DNUM?",
            ":VXI:CONF:INF? 24",
            ":VXI:SEL 24",
            ":VXI:REG:WRIT 8,32768",
            ":VXI:REG:READ? 8",
        ]
    );
}

#[test]
fn vxi_rejects_misaligned_registers_before_io() {
    let mut inst = Instrument::new(FakeLink::default());
    let mut vxi = inst.vxi();
    assert!(vxi.write_register(7, 0).is_err());
    assert!(vxi.write_register(64, 0).is_err());
    assert!(vxi.read_register(65).is_err());
    assert!(inst.into_inner().sent.is_empty());
}
