use clap::{App, AppSettings, Arg, SubCommand};

fn path_arg() -> Arg<'static, 'static> {
    return Arg::with_name("path")
        .long("path")
        .takes_value(true)
        .required(true)
        .help("The path of the disk image");
}

fn unit_arg(default: &'static str) -> Arg<'static, 'static> {
    return Arg::with_name("unit")
        .long("unit")
        .takes_value(true)
        .help(default);
}

fn fit_arg(help: &'static str) -> Arg<'static, 'static> {
    return Arg::with_name("fit")
        .long("fit")
        .takes_value(true)
        .help(help);
}

/// The command tree shared by one-shot invocations and the interactive shell.
pub fn build_app() -> App<'static, 'static> {
    return App::new("vdisk")
        .version("0.1.0")
        .about("Creates disk images and manages their partitions")
        .setting(AppSettings::VersionlessSubcommands)
        .setting(AppSettings::DisableHelpSubcommand)
        .subcommand(
            SubCommand::with_name("mkdisk")
                .about("Create a new zero-filled disk image")
                .arg(
                    Arg::with_name("size")
                        .long("size")
                        .takes_value(true)
                        .required(true)
                        .help("The size of the disk, a number or a sized string such as 10MiB"),
                )
                .arg(path_arg())
                .arg(unit_arg("b, k or m. Defaults to m"))
                .arg(fit_arg("The default fit of the disk: bf, ff or wf. Defaults to ff")),
        )
        .subcommand(
            SubCommand::with_name("rmdisk")
                .about("Delete a disk image")
                .arg(path_arg()),
        )
        .subcommand(
            SubCommand::with_name("fdisk")
                .about("Create or delete a partition")
                .arg(path_arg())
                .arg(
                    Arg::with_name("size")
                        .long("size")
                        .takes_value(true)
                        .required_unless("delete")
                        .help("The size of the partition"),
                )
                .arg(
                    Arg::with_name("name")
                        .long("name")
                        .takes_value(true)
                        .required_unless("delete")
                        .help("The name of the partition, at most 16 bytes"),
                )
                .arg(unit_arg("b, k or m. Defaults to k"))
                .arg(
                    Arg::with_name("type")
                        .long("type")
                        .takes_value(true)
                        .help("p, e or l. Defaults to p"),
                )
                .arg(fit_arg("bf, ff or wf. Defaults to the disk's fit"))
                .arg(
                    Arg::with_name("delete")
                        .long("delete")
                        .takes_value(true)
                        .conflicts_with_all(&["size", "name", "type", "fit", "unit"])
                        .help("Delete the named partition instead"),
                ),
        )
        .subcommand(
            SubCommand::with_name("mount")
                .about("Mount a partition")
                .arg(path_arg())
                .arg(
                    Arg::with_name("name")
                        .long("name")
                        .takes_value(true)
                        .required(true)
                        .help("The name of the partition"),
                ),
        )
        .subcommand(SubCommand::with_name("mounted").about("List the mounted partitions"))
        .subcommand(
            SubCommand::with_name("info")
                .about("Show a disk's partition table and its first bytes")
                .arg(path_arg()),
        )
        .subcommand(
            SubCommand::with_name("exit")
                .alias("quit")
                .about("Leave the interactive shell"),
        );
}
