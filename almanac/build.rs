use rustc_version::{version_meta, Channel};

const HOLIDAY_TABLES: [&str; 2] = ["almanac/data/holidays_cn.txt", "almanac/data/holidays_us.txt"];

fn detect_build_channel() -> Result<(), Box<dyn std::error::Error>> {
    let channel = match version_meta()?.channel {
        Channel::Stable => "CHANNEL_STABLE",
        Channel::Beta => "CHANNEL_BETA",
        Channel::Nightly => "CHANNEL_NIGHTLY",
        Channel::Dev => "CHANNEL_DEV",
    };

    println!("cargo:rustc-cfg={}", channel);
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    detect_build_channel()?;

    for path in HOLIDAY_TABLES {
        println!("cargo::rerun-if-changed={path}");
    }

    println!("cargo::rerun-if-changed=almanac/build.rs");
    Ok(())
}
