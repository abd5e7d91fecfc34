// Copyright Peter Bower 2025. All Rights Reserved.
// Licensed under Mozilla Public License (MPL) 2.0.

use std::env;
use std::fs;
use std::path::Path;

/// True if `feature` is listed in comma-separated `CARGO_CFG_TARGET_FEATURE`
fn has_feature(list: &str, feature: &str) -> bool {
    list.split(',').any(|f| f == feature)
}

/// Parses `SIMD_LANES_OVERRIDE="64,32,16,8"` into the four lane widths.
fn parse_override(val: &str) -> Option<(usize, usize, usize, usize)> {
    let parts: Vec<usize> = val
        .split(',')
        .map(|s| s.trim().parse::<usize>())
        .collect::<Result<_, _>>()
        .ok()?;
    match parts.as_slice() {
        &[w8, w16, w32, w64] if [w8, w16, w32, w64].iter().all(|w| w.is_power_of_two() && *w <= 64) => {
            Some((w8, w16, w32, w64))
        }
        _ => None,
    }
}

fn main() {
    let arch = env::var("CARGO_CFG_TARGET_ARCH").unwrap_or_default();
    let feats = env::var("CARGO_CFG_TARGET_FEATURE").unwrap_or_default();

    // Lane counts per element width: W8 for u8/i8, W16 for u16/i16,
    // W32 for u32/i32/f32 and W64 for u64/i64/f64.
    // Lane counts are capped at 64 so a lane mask always fits one u64.
    let (w8, w16, w32, w64) = match env::var("SIMD_LANES_OVERRIDE").ok() {
        Some(val) => match parse_override(&val) {
            Some(lanes) => {
                println!("cargo:warning=SIMD_LANES_OVERRIDE applied: {:?}", lanes);
                lanes
            }
            None => panic!(
                "Invalid SIMD_LANES_OVERRIDE. Expected 4 comma-separated powers of two <= 64, e.g., \"64,32,16,8\""
            ),
        },
        None => match arch.as_str() {
            "x86_64" | "x86" => {
                if has_feature(&feats, "avx512f") {
                    (64, 32, 16, 8)
                } else if has_feature(&feats, "avx2") {
                    (32, 16, 8, 4)
                } else if has_feature(&feats, "sse2") {
                    (16, 8, 4, 2)
                } else {
                    (8, 4, 2, 1)
                }
            }
            // NEON is mandatory on aarch64 unless explicitly disabled.
            "aarch64" => {
                if has_feature(&feats, "neon") {
                    (16, 8, 4, 2)
                } else {
                    (8, 4, 2, 1)
                }
            }
            "wasm32" => {
                if has_feature(&feats, "simd128") {
                    (16, 8, 4, 2)
                } else {
                    (8, 4, 2, 1)
                }
            }
            _ => (8, 4, 2, 1),
        },
    };

    let out_dir = env::var("OUT_DIR").expect("cargo always sets OUT_DIR for build scripts");
    let out_path = Path::new(&out_dir).join("simd_lanes.rs");

    fs::write(
        &out_path,
        format!(
            "
/// Auto-generated SIMD lane widths from build.rs

/// SIMD lane count for 8-bit elements (u8, i8).
#[allow(dead_code)]
pub const W8: usize = {w8};

/// SIMD lane count for 16-bit elements (u16, i16).
#[allow(dead_code)]
pub const W16: usize = {w16};

/// SIMD lane count for 32-bit elements (u32, i32, f32).
#[allow(dead_code)]
pub const W32: usize = {w32};

/// SIMD lane count for 64-bit elements (u64, i64, f64).
#[allow(dead_code)]
pub const W64: usize = {w64};
"
        ),
    )
    .expect("failed to write simd_lanes.rs");

    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_ARCH");
    println!("cargo:rerun-if-env-changed=CARGO_CFG_TARGET_FEATURE");
    println!("cargo:rerun-if-env-changed=SIMD_LANES_OVERRIDE");
}
