mod common;

use common::{current, fix_riff_size, get_u16, get_u32, legacy, put_u32, Order};
use pretty_assertions::assert_eq;
use wemkit::{
    detect_platform, downgrade_schema_field, inspect, needs_legacy_strip, strip_legacy,
    swap_platform, validate_container, ByteOrder, FmtShape, FormatError, Platform, SwapStage,
    WemError,
};

#[test]
fn test_detect_platform_from_magic() {
    assert_eq!(detect_platform(b"RIFF\0\0\0\0WAVE"), Platform::Pc);
    assert_eq!(detect_platform(b"RIFX\0\0\0\0WAVE"), Platform::Console);
    assert_eq!(detect_platform(b"OggS\0\0\0\0"), Platform::Unknown);
    assert_eq!(detect_platform(b"RIF"), Platform::Unknown);

    assert_eq!(Platform::Pc.byte_order(), Some(ByteOrder::Little));
    assert!(!Platform::Pc.is_console());
    assert_eq!(Platform::Console.byte_order(), Some(ByteOrder::Big));
    assert!(Platform::Console.is_console());
    assert_eq!(Platform::Unknown.byte_order(), None);
}

#[test]
fn test_validate_accepts_both_layouts_and_orders() {
    for order in [Order::Little, Order::Big] {
        validate_container(&current(order)).unwrap();
        validate_container(&legacy(order)).unwrap();
    }
}

#[test]
fn test_validate_names_vorb_length() {
    let mut data = legacy(Order::Little);
    put_u32(&mut data, 48, 41, Order::Little);
    let err = validate_container(&data).unwrap_err();
    assert!(matches!(err, WemError::Format(FormatError::VorbLength { found: 41 })));
    assert!(err.to_string().contains("vorb length"), "{err}");
}

#[test]
fn test_validate_names_file_truncated() {
    let mut data = current(Order::Big);
    data.truncate(data.len() - 1);
    let err = validate_container(&data).unwrap_err();
    assert!(err.to_string().contains("file truncated"), "{err}");

    let mut data = current(Order::Little);
    data.push(0);
    let err = validate_container(&data).unwrap_err();
    assert!(err.to_string().contains("file truncated"), "{err}");
}

#[test]
fn test_validate_rejects_unknown_platform() {
    let mut data = current(Order::Little);
    data[..4].copy_from_slice(b"RIFZ");
    assert!(matches!(
        validate_container(&data),
        Err(WemError::UnsupportedPlatform { .. })
    ));
}

#[test]
fn test_needs_legacy_strip() {
    assert!(needs_legacy_strip(&legacy(Order::Little)));
    assert!(needs_legacy_strip(&legacy(Order::Big)));
    assert!(!needs_legacy_strip(&current(Order::Little)));
    assert!(!needs_legacy_strip(b"RIFF"));
}

#[test]
fn test_strip_legacy_removes_vorb_header() {
    for order in [Order::Little, Order::Big] {
        let input = legacy(order);
        let out = strip_legacy(&input).unwrap();

        assert_eq!(out.len(), input.len() - 8);
        assert_eq!(get_u32(&out, 4, order), get_u32(&input, 4, order) - 8);
        assert_eq!(get_u32(&out, 16, order), 66);
        assert_eq!(get_u16(&out, 36, order), 48);
        assert_eq!(out, current(order));
        validate_container(&out).unwrap();
    }
}

#[test]
fn test_downgrade_only_touches_offset_40() {
    let data = current(Order::Big);
    assert_eq!(get_u32(&data, 40, Order::Big), 4);

    let out = downgrade_schema_field(&data).unwrap();
    assert_eq!(get_u32(&out, 40, Order::Big), 3);
    assert_eq!(out[..40], data[..40]);
    assert_eq!(out[44..], data[44..]);

    // already 3: byte-identical
    assert_eq!(downgrade_schema_field(&out).unwrap(), out);
}

#[test]
fn test_swap_round_trip() {
    let pc = current(Order::Little);
    let console = swap_platform(&pc).unwrap();

    assert_eq!(&console[..4], b"RIFX");
    assert_eq!(console, current(Order::Big));
    assert_eq!(swap_platform(&console).unwrap(), pc);
}

#[test]
fn test_swap_short_packet_stream() {
    let mut data = current(Order::Little);
    data.pop();
    fix_riff_size(&mut data, Order::Little);

    let err = swap_platform(&data).unwrap_err();
    match &err {
        WemError::IncompleteAudio { stage, offset } => {
            assert_eq!(*stage, SwapStage::CodebookCopied);
            assert!(*offset < data.len() as u64);
        }
        other => panic!("expected incomplete audio, got {other:?}"),
    }
    assert!(err.to_string().contains("incomplete or corrupt audio"));
}

#[test]
fn test_swap_rejects_legacy_and_bad_seek_size() {
    let err = swap_platform(&legacy(Order::Little)).unwrap_err();
    assert!(matches!(err, WemError::UnsupportedSchema { fmt_length: 24 }));

    let mut data = current(Order::Little);
    put_u32(&mut data, 60, 10, Order::Little);
    let err = swap_platform(&data).unwrap_err();
    assert!(matches!(err, WemError::Format(FormatError::SeekTableSize { found: 10 })));
}

#[test]
fn test_inspect_reports_header() {
    let info = inspect(&legacy(Order::Big)).unwrap();
    assert_eq!(info.platform, Platform::Console);
    assert_eq!(info.shape, FmtShape::Legacy);
    assert_eq!(info.fmt_length, 24);
    assert_eq!(info.fields.get("channels"), Some(&1));
    assert_eq!(info.hash_codebook.as_deref(), Some("10203040"));
    assert_eq!(info.seek_entries, Some(3));
}

#[test]
fn test_swap_round_trip_with_bytes_after_packets() {
    let mut pc = current(Order::Little);
    pc.extend_from_slice(&[0xAA, 0xBB]);
    fix_riff_size(&mut pc, Order::Little);
    let data_size = get_u32(&pc, 90, Order::Little) + 2;
    put_u32(&mut pc, 90, data_size, Order::Little);
    validate_container(&pc).unwrap();

    let console = swap_platform(&pc).unwrap();
    validate_container(&console).unwrap();
    assert_eq!(get_u32(&console, 90, Order::Big), data_size);
    assert_eq!(swap_platform(&console).unwrap(), pc);
}
