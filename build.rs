use std::env;
use std::path::PathBuf;

const WATCHED_VARS: [&str; 4] = ["FFMPEG_DIR", "VCPKG_ROOT", "VCPKGRS_DYNAMIC", "VCPKGRS_TRIPLET"];

fn main() {
    for var in WATCHED_VARS {
        println!("cargo:rerun-if-env-changed={var}");
    }

    // ffmpeg-sys-next finds FFmpeg through pkg-config everywhere except
    // Windows, where it needs FFMPEG_DIR or a vcpkg install.
    if env::var("CARGO_CFG_TARGET_OS").as_deref() != Ok("windows") {
        return;
    }
    if env::var_os("FFMPEG_DIR").is_some() {
        return;
    }

    match vcpkg_ffmpeg_dir() {
        Some(dir) if dir.exists() => println!(
            "cargo:warning=framegrab: using vcpkg FFmpeg at {0}; export FFMPEG_DIR={0} to silence this",
            dir.display(),
        ),
        Some(dir) => println!(
            "cargo:warning=framegrab: VCPKG_ROOT is set but {} does not exist",
            dir.display(),
        ),
        None => println!(
            "cargo:warning=framegrab: neither FFMPEG_DIR nor VCPKG_ROOT is set; the FFmpeg link step will likely fail"
        ),
    }
}

fn vcpkg_ffmpeg_dir() -> Option<PathBuf> {
    let root = env::var_os("VCPKG_ROOT")?;
    let triplet = env::var("VCPKGRS_TRIPLET").unwrap_or_else(|_| "x64-windows".to_string());
    Some(PathBuf::from(root).join("installed").join(triplet))
}
