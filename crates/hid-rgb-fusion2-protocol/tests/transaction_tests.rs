//! Transaction sequencing against the in-memory feature-report device.

use fusion_hid_common::mock::MockFeatureDevice;
use rgb_fusion2_hid_protocol::{
    Channel, ChannelSelection, ColorMode, LightingRequest, Rgb, RgbFusion2Protocol,
    RgbFusionError, Speed,
};

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn device() -> MockFeatureDevice {
    MockFeatureDevice::new(0x048D, 0x5702, "/dev/hidraw2")
}

/// GIVEN a controller
/// WHEN `sync` is set to static red
/// THEN seven settings writes go out in led1..led7 order, then one execute
#[test]
fn sync_static_red_sequence() -> TestResult {
    let dev = device();
    let mut proto = RgbFusion2Protocol::new(dev.clone());
    let request = LightingRequest::from_names("sync", "static", &["#ff0000"], "normal")?;
    proto.set_color(&request)?;

    let writes = dev.get_write_history();
    assert_eq!(writes.len(), 8);
    for (i, channel) in Channel::ALL.iter().enumerate() {
        let addr = channel.address();
        assert_eq!(writes[i].len(), 64);
        assert_eq!(writes[i][0], 0xCC);
        assert_eq!((writes[i][1], writes[i][2]), (addr.0, addr.1));
        assert_eq!(writes[i][12], 90);
        assert_eq!(&writes[i][14..17], &[0x00, 0x00, 0xFF]);
    }
    assert_eq!(&writes[7][..3], &[0xCC, 0x28, 0xFF]);
    assert_eq!(dev.release_count(), 1);
    Ok(())
}

/// GIVEN an unknown mode, channel or speed name
/// WHEN the request is resolved
/// THEN it fails before the device sees any I/O
#[test]
fn unknown_names_never_reach_the_device() {
    let dev = device();
    let _proto = RgbFusion2Protocol::new(dev.clone());

    let mode = LightingRequest::from_names("led1", "rainbow", &["zz"], "normal");
    assert!(matches!(mode, Err(RgbFusionError::UnknownMode(_))));

    let channel = LightingRequest::from_names("led9", "static", &["000000"], "normal");
    assert!(matches!(channel, Err(RgbFusionError::UnknownChannel(_))));

    let speed = LightingRequest::from_names("led1", "flash", &["000000"], "warp");
    assert!(matches!(speed, Err(RgbFusionError::UnknownSpeed(_))));

    assert!(dev.get_write_history().is_empty());
    assert!(dev.get_read_requests().is_empty());
    assert_eq!(dev.release_count(), 0);
}

/// GIVEN mode static and two colors
/// WHEN set_color runs
/// THEN it succeeds and only the first color is encoded
#[test]
fn extra_color_is_ignored() -> TestResult {
    let dev = device();
    let mut proto = RgbFusion2Protocol::new(dev.clone());
    let request = LightingRequest::with_colors(
        Channel::Led1.into(),
        ColorMode::Static,
        &[Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)],
        Speed::Normal,
    )?;
    assert_eq!(request.dropped_colors, 1);
    proto.set_color(&request)?;

    let writes = dev.get_write_history();
    assert_eq!(writes.len(), 2);
    assert_eq!(&writes[0][14..17], &[3, 2, 1]);
    Ok(())
}

/// GIVEN mode static and a speed name no table knows
/// WHEN set_color runs
/// THEN the speed is ignored and the speed bytes stay zero
#[test]
fn fixed_timing_mode_accepts_any_speed_name() -> TestResult {
    let dev = device();
    let mut proto = RgbFusion2Protocol::new(dev.clone());
    let request = LightingRequest::from_names("led2", "static", &["00ff00"], "bogus")?;
    proto.set_color(&request)?;

    let writes = dev.get_write_history();
    assert_eq!(writes.len(), 2);
    assert_eq!(&writes[0][14..17], &[0x00, 0xFF, 0x00]);
    assert!(writes[0][22..28].iter().all(|&b| b == 0));
    Ok(())
}

/// GIVEN consecutive operations on the same protocol value
/// THEN each one releases the device exactly once
#[test]
fn every_operation_releases() -> TestResult {
    let dev = device();
    let mut proto = RgbFusion2Protocol::new(dev.clone());

    proto.get_status()?;
    proto.reset_all_channels()?;
    let request =
        LightingRequest::new(ChannelSelection::Sync, ColorMode::Off, None, Speed::Normal)?;
    proto.set_color(&request)?;
    assert!(proto.initialize().is_err());

    assert_eq!(dev.release_count(), 4);
    Ok(())
}
