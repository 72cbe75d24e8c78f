use env_logger::Env;
use fretninja::{
    chord_shapes, chord_to_notes, identify_chord, parse_sheet, Instrument, InstrumentConfig,
    SearchOptions, Voicing,
};
use std::env;
use std::fs;
use std::process;

const USAGE: &str = "Usage: fretninja [options] <chord>
       fretninja [options] --sheet <file>
       fretninja --identify <chord>

Options:
  --limit <n>           Voicings per chord (default 5)
  --instrument <name>   guitar, drop-d, ukulele, bass, or a YAML instrument file";

fn fail(message: &str) -> ! {
    eprintln!("{}", message);
    process::exit(1);
}

fn print_voicing(voicing: &Voicing) {
    let fingers: Vec<String> = voicing.fingers.iter().map(u8::to_string).collect();
    println!("  {:<20} fingers {}", voicing.tab(), fingers.join(""));
}

fn load_instrument(arg: &str) -> (Instrument, SearchOptions) {
    if let Some(instrument) = Instrument::preset(arg) {
        return (instrument, SearchOptions::default());
    }
    match InstrumentConfig::from_file(arg) {
        Ok(config) => (config.instrument, config.options),
        Err(e) => fail(&format!("Error loading instrument: {}", e)),
    }
}

fn main() {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = env::args().skip(1).collect();
    if args.is_empty() {
        fail(USAGE);
    }

    let mut instrument_override: Option<(Instrument, SearchOptions)> = None;
    let mut limit: Option<usize> = None;
    let mut sheet_path: Option<&String> = None;
    let mut identify = false;
    let mut chord: Option<&String> = None;

    // Parse flags
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--limit" => {
                let value = iter.next().unwrap_or_else(|| fail(USAGE));
                match value.parse::<usize>() {
                    Ok(n) if n > 0 => limit = Some(n),
                    _ => fail(&format!("Invalid limit: {}", value)),
                }
            }
            "--instrument" => {
                let value = iter.next().unwrap_or_else(|| fail(USAGE));
                instrument_override = Some(load_instrument(value));
            }
            "--sheet" => sheet_path = Some(iter.next().unwrap_or_else(|| fail(USAGE))),
            "--identify" => identify = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            _ if chord.is_none() && !arg.starts_with("--") => chord = Some(arg),
            _ => fail(USAGE),
        }
    }

    if let Some(path) = sheet_path {
        run_sheet(path, instrument_override, limit);
        return;
    }

    let (instrument, mut options) =
        instrument_override.unwrap_or_else(|| (Instrument::standard_guitar(), SearchOptions::default()));
    if let Some(n) = limit {
        options.limit = n;
    }

    let Some(symbol) = chord else {
        fail(USAGE);
    };

    if identify {
        run_identify(symbol);
    } else {
        run_chord(symbol, &instrument, &options);
    }
}

fn run_chord(symbol: &str, instrument: &Instrument, options: &SearchOptions) {
    let groups = match chord_shapes(symbol, instrument, options) {
        Ok(groups) => groups,
        Err(e) => fail(&format!("Error: {}", e)),
    };

    if let Ok(notes) = chord_to_notes(symbol, true) {
        for warning in &notes.warnings {
            eprintln!("Warning: {}", warning);
        }
    }

    for group in &groups {
        println!("{} ({})", group.display_name, instrument.name);
        if group.voicings.is_empty() {
            println!("  no playable voicing");
        }
        for voicing in &group.voicings {
            print_voicing(voicing);
        }
    }
}

fn run_identify(symbol: &str) {
    match identify_chord(symbol) {
        Ok(identification) => {
            let names: Vec<&str> = identification.notes.iter().map(|n| fretninja::root_name(*n)).collect();
            println!("{}: {}", identification.requested, names.join(" "));
            if identification.alternates.is_empty() {
                println!("  no other names");
            } else {
                println!("  also: {}", identification.alternates.join(", "));
            }
        }
        Err(e) => fail(&format!("Error: {}", e)),
    }
}

/// The sheet's frontmatter picks the instrument unless `--instrument` was given;
/// `--limit` applies on top of either.
fn run_sheet(path: &str, instrument_override: Option<(Instrument, SearchOptions)>, limit: Option<usize>) {
    let source = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => fail(&format!("Error reading file '{}': {}", path, e)),
    };

    let mut sheet = match parse_sheet(&source) {
        Ok(sheet) => sheet,
        Err(e) => fail(&format!("Error parsing sheet: {}", e)),
    };
    if let Some((instrument, options)) = instrument_override {
        sheet.set_instrument(instrument, options);
    }
    if let Some(n) = limit {
        sheet.metadata.options.limit = n;
    }

    if let Some(title) = &sheet.metadata.title {
        println!("{}", title);
    }

    let (sequence, issues) = sheet.build_sequence();
    for entry in sequence.entries() {
        println!("{}", entry.symbol);
        print_voicing(&entry.voicing);
    }
    for issue in &issues {
        eprintln!(
            "Skipped {} at {}:{}: {}",
            issue.symbol, issue.line, issue.column, issue.message
        );
    }
    eprintln!("Total movement: {}", sequence.total_distance());
}
