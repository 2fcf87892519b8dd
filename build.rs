//! Compresses the Vial keyboard definition into the firmware and passes the
//! linker scripts.

use std::fs;
use std::io::Read;
use std::path::Path;
use std::env;

use const_gen::*;
use xz2::read::XzEncoder;

fn main() {
    generate_vial_config();

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
}

fn generate_vial_config() {
    let out_file = Path::new(&env::var_os("OUT_DIR").unwrap()).join("config_generated.rs");

    let p = Path::new("vial.json");
    println!("cargo:rerun-if-changed=vial.json");
    let content = fs::read_to_string(p).expect("Cannot read vial.json");

    let vial_cfg = json::stringify(json::parse(&content).expect("vial.json is not valid JSON"));
    let mut keyboard_def_compressed: Vec<u8> = Vec::new();
    XzEncoder::new(vial_cfg.as_bytes(), 6)
        .read_to_end(&mut keyboard_def_compressed)
        .unwrap();

    let keyboard_id: Vec<u8> = vec![0x5A, 0x3C, 0x1F, 0xB2, 0x64, 0x0D, 0x8E, 0x27];
    let const_declarations = [
        const_declaration!(pub VIAL_KEYBOARD_DEF = keyboard_def_compressed),
        const_declaration!(pub VIAL_KEYBOARD_ID = keyboard_id),
    ]
    .map(|s| "#[allow(clippy::redundant_static_lifetimes)]\n".to_owned() + s.as_str())
    .join("\n");
    fs::write(out_file, const_declarations).unwrap();
}
