use std::process::ExitCode;

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{CommandFactory, Parser};
use dosdate::{Clock, DateTimeFields, DosDateTime, Error, Field, SystemClock, Validation};

fn styles() -> Styles {
    let bold = |color: AnsiColor| color.on_default().effects(Effects::BOLD);
    Styles::styled()
        .header(bold(AnsiColor::Green))
        .usage(bold(AnsiColor::Green))
        .literal(bold(AnsiColor::Cyan))
        .placeholder(AnsiColor::Cyan.on_default())
        .error(bold(AnsiColor::Red))
        .valid(bold(AnsiColor::Cyan))
        .invalid(bold(AnsiColor::Yellow))
}

/// Print the MS-DOS date and time words for a calendar date and time.
///
/// When no date or time is given, the current UTC time is used. Otherwise
/// missing trailing values default to 1980-01-01 00:00:00.000.
#[derive(Parser, Debug)]
#[command(name = "dosdatetime", version, about, long_about = None)]
#[command(styles = styles())]
struct Cli {
    /// Year, 1980 through 2107
    #[arg()]
    year: Option<u16>,

    /// Month, 1 = January
    #[arg()]
    month: Option<u16>,

    #[arg()]
    day: Option<u16>,

    #[arg()]
    hour: Option<u16>,

    #[arg()]
    minute: Option<u16>,

    /// Second, stored with two second granularity
    #[arg()]
    second: Option<u16>,

    /// Milliseconds, shown but never stored
    #[arg(value_name = "MILLISECONDS")]
    millisecond: Option<u16>,

    /// Only check the year range and the month and day lower bounds, and
    /// pack everything else as given
    #[arg(long)]
    legacy: bool,
}

impl Cli {
    fn positionals(&self) -> [Option<u16>; 7] {
        [
            self.year,
            self.month,
            self.day,
            self.hour,
            self.minute,
            self.second,
            self.millisecond,
        ]
    }

    fn validation(&self) -> Validation {
        if self.legacy {
            Validation::Legacy
        } else {
            Validation::Strict
        }
    }

    fn fields(&self, clock: &impl Clock) -> DateTimeFields {
        let supplied = self.positionals();
        if supplied.iter().all(Option::is_none) {
            log::debug!("No date or time given, reading the clock");
            return clock.now();
        }

        let mut fields = DateTimeFields::default();
        for (field, value) in Field::ALL.into_iter().zip(supplied) {
            if let Some(value) = value {
                fields.set(field, value);
            }
        }
        fields
    }
}

fn run(cli: &Cli, clock: &impl Clock) -> Result<(DateTimeFields, DosDateTime), Error> {
    let fields = cli.fields(clock);
    let validation = cli.validation();
    log::debug!("Encoding {} with {:?} validation", fields, validation);
    let packed = DosDateTime::encode_with(&fields, validation)?;
    Ok((fields, packed))
}

fn render(fields: &DateTimeFields, packed: DosDateTime) -> String {
    format!(
        "Time: {}\n\
         DOS Date:         0x{:x}\n\
         DOS Time:         0x{:x}\n\
         DOS DateTime:     0x{:x}\n",
        fields,
        packed.date(),
        packed.time(),
        packed
    )
}

fn render_error(err: &Error) -> String {
    format!("{err}\n{}", Cli::command().render_usage())
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // --help and --version also come through here
            let _ = err.print();
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(&cli, &SystemClock) {
        Ok((fields, packed)) => {
            print!("{}", render(&fields, packed));
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", render_error(&err));
            ExitCode::FAILURE
        }
    }
}
