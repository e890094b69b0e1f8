use clap::Parser;
use dicebot::{
    MarkdownStringifier, RollContext, SimpleStringifier, Stringify, DEFAULT_MAX_ROLLS,
};
use rand::{rngs::StdRng, SeedableRng};
use std::io::{self, BufRead, Write};

/// Roll dice formulas such as `2d6 + 3, to hit = d20 + 5`.
///
/// With no formula arguments, reads formulas from standard input; an empty
/// line rolls everything typed since the previous roll.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Formulas to roll, each rolled separately
    formulas: Vec<String>,

    /// Seed for reproducible rolls
    #[arg(long, env = "DICEBOT_SEED")]
    seed: Option<u64>,

    /// Most dice a single formula may roll
    #[arg(long, env = "DICEBOT_MAX_ROLLS", default_value_t = DEFAULT_MAX_ROLLS)]
    max_rolls: u64,

    /// Print plain text instead of Discord Markdown
    #[arg(long)]
    raw: bool,

    /// Stop a formula at its first error and exit with a failure status
    #[arg(long)]
    strict: bool,
}

struct Session {
    args: Args,
    rng: StdRng,
    stringifier: Box<dyn Stringify>,
}

impl Session {
    fn new(args: Args) -> Self {
        let rng = match args.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let stringifier: Box<dyn Stringify> = if args.raw {
            Box::new(SimpleStringifier::new())
        } else {
            Box::new(MarkdownStringifier::new())
        };
        log::debug!(
            "seed {:?}, at most {} rolls per formula",
            args.seed,
            args.max_rolls
        );
        Self {
            args,
            rng,
            stringifier,
        }
    }

    fn roll(&mut self, input: &[u8]) -> dicebot::Result<String> {
        let mut ctx = RollContext::new_bounded(self.args.max_rolls, &mut self.rng);

        if !self.args.strict {
            return Ok(dicebot::roll(&mut *self.stringifier, input, &mut ctx));
        }

        let lines: Vec<_> = dicebot::evaluate(input, &mut ctx)?
            .into_iter()
            .map(|(label, x)| self.stringifier.str_result(&label, &Ok(x)))
            .collect();
        Ok(lines.join("\n"))
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = Args::parse();
    let formulas = std::mem::take(&mut args.formulas);
    let mut session = Session::new(args);

    if !formulas.is_empty() {
        let mut failed = false;
        for formula in &formulas {
            match session.roll(formula.as_bytes()) {
                Ok(r) => println!("{}", r),
                Err(why) => {
                    eprintln!("Error: {}", why);
                    failed = true;
                }
            }
        }
        if failed {
            std::process::exit(1);
        }
        return Ok(());
    }

    let stdin = io::stdin();
    let mut lines = stdin.lock().split(b'\n');
    let mut buf = Vec::new();
    print!("> ");
    io::stdout().flush()?;
    while let Some(line) = lines.next() {
        let line = line?;
        if line.iter().all(u8::is_ascii_whitespace) {
            match session.roll(&buf) {
                Ok(r) => println!("{}", r),
                Err(why) => eprintln!("Error: {}", why),
            }
            print!("> ");
            io::stdout().flush()?;
            buf.clear();
        } else {
            buf.extend_from_slice(&line);
            buf.push(b'\n');
            print!("... ");
            io::stdout().flush()?;
        }
    }
    Ok(())
}
