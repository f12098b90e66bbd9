#[macro_use]
extern crate clap;

use clap::Arg;
use std::fs;
use std::io;
use std::io::prelude::*;
use std::process;

use mcpu::{Processor, MEM_SIZE};

fn main() {
    let matches = app_from_crate!()
        .arg(
            Arg::with_name("PROGRAM")
                .help("Sets the memory image to execute")
                .required(true)
                .index(1),
        )
        .get_matches();

    let path = matches.value_of("PROGRAM").unwrap();
    let image = match fs::read(path) {
        Ok(image) => image,
        Err(err) => {
            eprintln!("Reading \"{}\" failed: {}", path, err);
            process::exit(2);
        }
    };
    if image.len() != MEM_SIZE {
        eprintln!("Invalid input file.");
        process::exit(2);
    }

    let mut processor = Processor::new();
    processor.load_memory(&image, 0);

    // One consumed character advances the machine by one cycle.
    let stdin = io::stdin();
    let mut input = stdin.lock().bytes();
    loop {
        clear();
        dump(&processor);
        match input.next() {
            Some(Ok(_)) => processor.update(),
            _ => break,
        }
    }
    clear();
}

fn clear() {
    print!("\x1B[2J\x1B[1;1H");
}

fn dump(processor: &Processor) {
    println!("Cycle: {}", processor.cycle());
    println!("Instruction: {:04X}", processor.instruction());
    println!("Address: {:04X}", processor.address());
    println!("Temporary PC: {:04X}", processor.temp_pc());
    println!("Bus: {:04X}", processor.bus());
    println!("ALU Left: {:04X}", processor.alu_left());
    println!("ALU Right: {:04X}", processor.alu_right());
    println!("ALU Result: {:04X}", processor.alu_result());
    println!("Take branch: {}", processor.take_branch());
    for (i, value) in processor.registers().iter().enumerate() {
        println!("r{}: {:04X}", i, value);
    }
    let _ = io::stdout().flush();
}
