//! Decodes a hex ROM string from argv and prints its decoded form as
//! JSON — the "materialize golden data" role the teacher's `gen_*_tests`
//! binaries play, scaled down to a single ad hoc ROM instead of a
//! thousand randomly-generated CPU states.
//!
//! Usage: `dump_fixture <hex bytes> [start_pc]`
//! e.g. `dump_fixture 3e0118fe 0x100`

use smsz80_fixtures::JsonDecodeResult;

fn main() {
    let mut args = std::env::args().skip(1);
    let hex = match args.next() {
        Some(h) => h,
        None => {
            eprintln!("usage: dump_fixture <hex bytes> [start_pc]");
            std::process::exit(1);
        }
    };
    let start_pc = match args.next() {
        Some(s) => parse_u16(&s).unwrap_or_else(|e| {
            eprintln!("invalid start_pc {s:?}: {e}");
            std::process::exit(1);
        }),
        None => 0,
    };

    let rom = match parse_hex(&hex) {
        Ok(bytes) => bytes,
        Err(e) => {
            eprintln!("invalid hex rom: {e}");
            std::process::exit(1);
        }
    };

    let result = smsz80_core::decode::decode_block(&rom, start_pc);
    let json = JsonDecodeResult::from(&result);
    println!("{}", serde_json::to_string_pretty(&json).expect("JsonDecodeResult always serializes"));
}

fn parse_hex(s: &str) -> Result<Vec<u8>, String> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.len() % 2 != 0 {
        return Err("odd number of hex digits".to_string());
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).map_err(|e| e.to_string()))
        .collect()
}

fn parse_u16(s: &str) -> Result<u16, String> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    u16::from_str_radix(s, 16).map_err(|e| e.to_string())
}
