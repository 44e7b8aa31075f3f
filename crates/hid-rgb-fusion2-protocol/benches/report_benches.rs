use criterion::{Criterion, criterion_group, criterion_main};
use rgb_fusion2_hid_protocol::{
    Channel, ColorMode, DEFAULT_BRIGHTNESS, Rgb, Speed, build_settings_report,
    parse_init_response, set_address,
};

fn benchmark_settings_report(c: &mut Criterion) {
    c.bench_function("build_settings_report static", |b| {
        b.iter(|| {
            std::hint::black_box(build_settings_report(
                std::hint::black_box(ColorMode::Static),
                Some(Rgb::new(255, 0, 0)),
                Speed::Normal,
                DEFAULT_BRIGHTNESS,
            ))
        });
    });

    c.bench_function("build_settings_report every mode and speed", |b| {
        b.iter(|| {
            for mode in ColorMode::ALL {
                for speed in Speed::ALL {
                    let color = Some(Rgb::new(1, 2, 3));
                    let report = build_settings_report(mode, color, speed, DEFAULT_BRIGHTNESS);
                    if let Ok(r) = report {
                        std::hint::black_box(r);
                    }
                }
            }
        });
    });

    c.bench_function("set_address sync expansion", |b| {
        let template = [0u8; 64];
        b.iter(|| {
            let mut report = template;
            for channel in Channel::ALL {
                set_address(&mut report, channel.address());
                std::hint::black_box(&report);
            }
        });
    });
}

fn benchmark_init_response(c: &mut Criterion) {
    let mut data = vec![0u8; 64];
    data[0] = 0xCC;
    data[1] = 0x01;
    data[3] = 7;
    data[4..8].copy_from_slice(&[1, 0, 10, 0]);
    data[12..37].copy_from_slice(b"IT8297-GIGABYTE V1.0.10.0");

    c.bench_function("parse_init_response", |b| {
        b.iter(|| parse_init_response(std::hint::black_box(&data)));
    });
}

criterion_group!(benches, benchmark_settings_report, benchmark_init_response);
criterion_main!(benches);
