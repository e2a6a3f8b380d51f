extern crate log;
extern crate pretty_env_logger;

use std::path::Path;
use std::process::exit;

use clap::{arg, command, Command};

use omr_grader::exam::ExamDefinition;
use omr_grader::geometry::bubble_coordinates;
use omr_grader::interpret::{grade_sheet, InterpretOptions};

fn main() {
    pretty_env_logger::init_custom_env("LOG");

    let matches = cli().get_matches();
    let debug = matches.get_flag("debug");
    let json = matches.get_flag("json");
    let exam_path = matches
        .get_one::<String>("exam")
        .expect("exam path is required");

    let exam = match ExamDefinition::load(Path::new(exam_path)) {
        Ok(exam) => exam,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    let geometry = match exam.geometry() {
        Ok(geometry) => geometry,
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    };

    if matches.get_flag("layout") {
        match serde_json::to_string_pretty(&bubble_coordinates(&geometry)) {
            Ok(layout) => println!("{}", layout),
            Err(e) => {
                eprintln!("Error: {}", e);
                exit(1);
            }
        }
        return;
    }

    let Some(image_path) = matches.get_one::<String>("image_path") else {
        eprintln!("Error: a sheet image is required");
        exit(1);
    };

    let options = InterpretOptions {
        debug,
        geometry,
        thresholds: exam.thresholds(),
    };

    match grade_sheet(Path::new(image_path), &exam.answer_key, &options) {
        Ok(report) if json => match serde_json::to_string_pretty(&report) {
            Ok(report) => println!("{}", report),
            Err(e) => {
                eprintln!("Error: {}", e);
                exit(1);
            }
        },
        Ok(report) => {
            println!("{}", exam.title);
            print!("{}", report);
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}

#[allow(clippy::cognitive_complexity)]
fn cli() -> Command {
    command!()
        .arg(arg!(-e --exam <PATH> "Path to exam.json file with the answer key").required(true))
        .arg(arg!(-d --debug "Write an annotated debug image next to the input"))
        .arg(arg!(--json "Print the report as JSON"))
        .arg(arg!(--layout "Print every bubble coordinate for the exam's sheet and exit"))
        .arg(
            arg!(image_path: [SHEET_IMAGE] "Path to the scanned answer sheet")
                .required_unless_present("layout"),
        )
}
