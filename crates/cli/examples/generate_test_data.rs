use std::fs::File;
use std::io::{BufWriter, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let output_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "/tmp/test_pairs.txt".to_string());

    let mut writer = BufWriter::new(File::create(&output_file)?);

    println!("Generating test pair file: {}\n", output_file);

    // Unique hashes
    println!("Adding unique records...");
    for i in 0..10 {
        writeln!(writer, "message_{} {:X}", i, 0x1000 + i)?;
    }

    // Two-way collision
    println!("Adding a two-way collision...");
    writeln!(writer, "apple CAFE")?;
    writeln!(writer, "orange CAFE")?;

    // Three-way collision
    println!("Adding a three-way collision...");
    writeln!(writer, "red BEEF")?;
    writeln!(writer, "green BEEF")?;
    writeln!(writer, "blue BEEF")?;

    // Repeated record: not a collision
    println!("Adding repeated records...");
    writeln!(writer, "apple CAFE")?;
    writeln!(writer, "message_3 1003")?;

    // Trailing tokens are ignored
    println!("Adding records with extra columns...");
    writeln!(writer, "pear   F00D   1   extra")?;
    writeln!(writer, "plum\tF00D")?;

    // Malformed line, skipped with a warning
    println!("Adding a malformed line...");
    writeln!(writer, "lonely")?;

    writer.flush()?;

    println!("\nDone. Expected: 7 colliding data on 17 unique messages, 3 colliding hashes.");
    println!("Try: hashprobe collisions -v {}", output_file);

    Ok(())
}
