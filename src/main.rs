use std::io::{self, BufRead, Write};

use clap::{arg, command};
use huffman_text::Codec;
use huffman_text::huffman::count_frequencies;
use huffman_text::report::{CompressionReport, render_code_table};
use log::{debug, error, info};

enum Choice {
    Encode,
    Exit,
    Unknown(i64),
}

fn encode_round(text: &str) -> anyhow::Result<()> {
    let data = text.as_bytes();
    let codec = Codec::from_text(data);

    println!("\nHuffman Code Table:");
    print!("{}", render_code_table(codec.code_table_snapshot()));
    println!(
        "Alphabet size: {} symbols over {} bytes",
        codec.tree().leaf_count(),
        codec.tree().weight()
    );

    let encoded = codec.encode(data)?;
    println!("\nEncoded text: {}", encoded);

    let decoded = codec.decode(&encoded)?;
    println!("Decoded text: {}", String::from_utf8_lossy(&decoded));
    if decoded != data {
        anyhow::bail!("decoded text does not match the input");
    }

    let report = CompressionReport::new(data, &encoded, &count_frequencies(data));
    println!("\nCompression Analysis:\n{}", report);
    Ok(())
}

fn read_line(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<Option<String>> {
    io::stdout().flush()?;
    Ok(lines.next().transpose()?)
}

fn read_choice(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<Option<Choice>> {
    loop {
        println!("Huffman Compression Menu");
        println!("  1. Encode text");
        println!("  2. Exit");
        print!("\nChoose an option: ");

        let Some(line) = read_line(lines)? else {
            return Ok(None);
        };
        match line.trim().parse::<i64>() {
            Ok(1) => return Ok(Some(Choice::Encode)),
            Ok(2) => return Ok(Some(Choice::Exit)),
            Ok(n) => return Ok(Some(Choice::Unknown(n))),
            Err(_) => {
                debug!("Rejected menu input {:?}", line);
                println!("Invalid input. Please enter a number.");
            }
        }
    }
}

fn run_menu() -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(choice) = read_choice(&mut lines)? else {
            info!("stdin closed, leaving menu");
            return Ok(());
        };

        match choice {
            Choice::Encode => {
                print!("\nEnter text to encode: ");
                let Some(text) = read_line(&mut lines)? else {
                    return Ok(());
                };
                if let Err(e) = encode_round(&text) {
                    error!("Encoding round failed: {}", e);
                    eprintln!("❌ {}", e);
                }
                println!("\n---------------------------------------------\n");
            }
            Choice::Exit => {
                println!("Exiting...");
                return Ok(());
            }
            Choice::Unknown(n) => {
                debug!("Unknown menu choice {}", n);
                println!("Invalid choice. Please try again.");
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = command!()
        .arg(
            arg!(-t --text <TEXT> "Encode TEXT once and exit instead of showing the menu")
                .required(false),
        )
        .get_matches();

    match matches.get_one::<String>("text") {
        Some(text) => encode_round(text),
        None => run_menu(),
    }
}
