use std::{fs, path::Path};

use ra_lib::{
    diagnostic::{AggregateResult, Code, DiagnosticKind},
    run, script_dir, RunOptsBuilder,
};

include! {concat!(env!("OUT_DIR"), "/tests.rs")}

pub fn run_file(file: &str) -> AggregateResult<Vec<u8>> {
    let source = fs::read_to_string(file).unwrap();
    let opts = RunOptsBuilder::new();
    let opts = match script_dir(Path::new(file)) {
        Some(dir) => opts.import_root(dir),
        None => opts,
    };
    run(&source, &opts.build().unwrap())
}

fn print_diagnostics<T>(res: &AggregateResult<T>) {
    for (t, d) in res.diagnostics() {
        match t {
            DiagnosticKind::Rec => println!("Rec: {d:?}"),
            DiagnosticKind::Err => println!("Err: {d:?}"),
        }
    }
}

fn output_test(file: &str, expected: &str) {
    let res = run_file(file);
    if res.is_err() {
        println!(
            "Expected file `{}` to run successfully but got the following diagnostics:",
            file
        );
        print_diagnostics(&res);
        println!();
    }
    let output = String::from_utf8(res.into_value().unwrap()).unwrap();

    pretty_assertions::assert_str_eq!(
        output,
        expected,
        "The transcript (left) does not match the expected transcript (right)",
    );
}

fn diagnostics_test(file: &str, expected_codes: Vec<Code>, needs_err: bool) {
    let res = run_file(file);
    if needs_err && !res.is_err() {
        panic!("Expected the script to fail, but it didn't!");
    }
    if !needs_err && res.is_err() {
        println!("Expected the script to run with only warnings, but it didn't! Here are the diagnostics:");
        print_diagnostics(&res);
        panic!();
    }

    let found_codes: Vec<_> = res.diagnostics().map(|(_, d)| *d.code()).collect();
    if expected_codes != found_codes {
        println!(
            "Expected to find these diagnostic codes: {:?}
                              But found: {:?}",
            expected_codes, found_codes
        );
        panic!("Not the same diagnostics");
    }
}
