//! Round-trip the fixture corpus through the decoder and encoder.

use libjot::{decode, encode};
use std::fs;
use std::path::Path;

fn main() {
    let test_dir = Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap().join("test");

    let mut passed = 0;
    let mut failed = 0;

    for entry in fs::read_dir(test_dir.join("json")).unwrap() {
        let path = entry.unwrap().path();
        if !path.extension().map(|e| e == "json").unwrap_or(false) {
            continue;
        }
        let basename = path.file_stem().unwrap().to_str().unwrap().to_string();
        let content = fs::read_to_string(&path).unwrap();

        match decode(&content) {
            Ok(value) => {
                let canonical = encode(&value);
                match decode(&canonical) {
                    Ok(again) if again == value && encode(&again) == canonical => {
                        passed += 1;
                        println!("{} => {}", basename, canonical);
                    }
                    Ok(_) => {
                        failed += 1;
                        println!("FAIL: {} is not round-trip stable", basename);
                    }
                    Err(e) => {
                        failed += 1;
                        println!("FAIL: {} canonical form rejected: {}", basename, e);
                    }
                }
            }
            Err(e) => {
                failed += 1;
                println!("FAIL: {} did not decode: {}", basename, e);
            }
        }
    }

    println!("\nResults: {} passed, {} failed", passed, failed);
}
