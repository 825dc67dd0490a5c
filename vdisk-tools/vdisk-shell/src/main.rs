use std::process::exit;
use vdisk_shell::{build_app, normalize_argument, Application, Outcome};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let arguments: Vec<String> = std::env::args()
        .enumerate()
        .map(|(i, a)| if i == 0 { a } else { normalize_argument(&a) })
        .collect();

    let matches = build_app().get_matches_from(arguments);
    let mut application = Application::new();

    if matches.subcommand_name().is_none() {
        let stdin = std::io::stdin();

        match application.run(stdin.lock(), std::io::stdout()) {
            Ok(_) => (),
            Err(e) => {
                eprintln!("Error: {}", e);
                exit(1);
            }
        }

        return;
    }

    match application.execute(&matches) {
        Ok(Outcome::Report(r)) => println!("{}", r),
        Ok(Outcome::Exit) => (),
        Err(e) => {
            eprintln!("Error: {}", e);
            exit(1);
        }
    }
}
