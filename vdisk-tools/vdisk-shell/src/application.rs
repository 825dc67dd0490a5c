use crate::{build_app, tokenize, ShellError};
use clap::{ArgMatches, ErrorKind};
use std::io::{BufRead, Write};
use vdisk::{FitStrategy, PartitionKind};
use vdisk_tool_lib::{expand_path, parse_size, report, Session, SizeUnit};

/// What a command asks of the caller.
#[derive(Clone, Debug, PartialEq)]
pub enum Outcome {
    Report(String),
    Exit,
}

pub struct Application {
    session: Session,
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> Result<&'a str, ShellError> {
    return match matches.value_of(name) {
        Some(v) => Ok(v),
        None => Err(ShellError::new(&format!("--{} is required", name))),
    };
}

fn parse_fit(matches: &ArgMatches) -> Result<Option<FitStrategy>, ShellError> {
    return match matches.value_of("fit") {
        Some(f) => match FitStrategy::from_name(f) {
            Some(fit) => Ok(Some(fit)),
            None => Err(ShellError::new(&format!("Unknown fit \"{}\"", f))),
        },
        None => Ok(None),
    };
}

impl Application {
    pub fn new() -> Self {
        return Self {
            session: Session::new(),
        };
    }

    /// Runs the read-eval-print loop until `exit` or the end of the input.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), ShellError> {
        let mut lines = input.lines();

        loop {
            ignore_result!(write!(output, "vdisk> "));
            ignore_result!(output.flush());

            let line = match lines.next() {
                Some(Ok(l)) => l,
                Some(Err(e)) => {
                    return Err(ShellError::new(&format!("Failed to read input. Error: {}", e)))
                }
                None => break,
            };

            match self.execute_line(&line) {
                Ok(Some(Outcome::Exit)) => break,
                Ok(Some(Outcome::Report(r))) => ignore_result!(writeln!(output, "{}", r)),
                Ok(None) => (),
                Err(e) => eprintln!("Error: {}", e),
            }
        }

        return Ok(());
    }

    /// Tokenises and runs one line of input. Blank lines and comments give None.
    pub fn execute_line(&mut self, line: &str) -> Result<Option<Outcome>, ShellError> {
        let tokens = tokenize(line)?;

        if tokens.is_empty() {
            return Ok(None);
        }

        let mut arguments = vec!["vdisk".to_string()];
        arguments.extend(tokens);

        let matches = match build_app().get_matches_from_safe(arguments) {
            Ok(m) => m,
            Err(e) => match e.kind {
                ErrorKind::HelpDisplayed | ErrorKind::VersionDisplayed => {
                    return Ok(Some(Outcome::Report(e.message)))
                }
                _ => return Err(ShellError::new(&e.message)),
            },
        };

        return self.execute(&matches).map(Some);
    }

    pub fn execute(&mut self, matches: &ArgMatches) -> Result<Outcome, ShellError> {
        return match matches.subcommand() {
            ("mkdisk", Some(m)) => self.make_disk(m),
            ("rmdisk", Some(m)) => self.remove_disk(m),
            ("fdisk", Some(m)) => self.format_disk(m),
            ("mount", Some(m)) => self.mount(m),
            ("mounted", Some(_)) => Ok(Outcome::Report(report::mount_list(
                self.session.list_mounts(),
            ))),
            ("info", Some(m)) => self.info(m),
            ("exit", Some(_)) => Ok(Outcome::Exit),
            _ => Err(ShellError::new("No command was given. Try --help.")),
        };
    }

    fn make_disk(&mut self, matches: &ArgMatches) -> Result<Outcome, ShellError> {
        let path = required(matches, "path")?;
        let size = parse_size(
            required(matches, "size")?,
            matches.value_of("unit"),
            SizeUnit::Megabytes,
        )?;
        let fit = parse_fit(matches)?.unwrap_or_default();

        let info = self.session.create_disk(size, path, fit)?;

        return Ok(Outcome::Report(report::disk_created(&expand_path(path), &info)));
    }

    fn remove_disk(&mut self, matches: &ArgMatches) -> Result<Outcome, ShellError> {
        let path = self.session.delete_disk(required(matches, "path")?)?;

        return Ok(Outcome::Report(report::disk_deleted(&path)));
    }

    fn format_disk(&mut self, matches: &ArgMatches) -> Result<Outcome, ShellError> {
        let path = required(matches, "path")?;

        if let Some(name) = matches.value_of("delete") {
            let removed = self.session.delete_partition(path, name)?;
            return Ok(Outcome::Report(report::partition_deleted(&removed)));
        }

        let size = parse_size(
            required(matches, "size")?,
            matches.value_of("unit"),
            SizeUnit::Kilobytes,
        )?;

        let kind = match matches.value_of("type") {
            Some(t) => match PartitionKind::from_name(t) {
                Some(k) => k,
                None => return Err(ShellError::new(&format!("Unknown partition type \"{}\"", t))),
            },
            None => PartitionKind::Primary,
        };

        let created = self.session.create_partition(
            path,
            size,
            kind,
            parse_fit(matches)?,
            required(matches, "name")?,
        )?;

        return Ok(Outcome::Report(report::partition_created(&created)));
    }

    fn mount(&mut self, matches: &ArgMatches) -> Result<Outcome, ShellError> {
        let path = required(matches, "path")?;
        let name = required(matches, "name")?;

        let id = self.session.mount(path, name)?;

        return Ok(Outcome::Report(report::mounted(id, &expand_path(path), name)));
    }

    fn info(&mut self, matches: &ArgMatches) -> Result<Outcome, ShellError> {
        let dump = self.session.disk_info(required(matches, "path")?)?;

        return Ok(Outcome::Report(report::disk_info(&dump)));
    }
}

impl Default for Application {
    fn default() -> Self {
        return Self::new();
    }
}
