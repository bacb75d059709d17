use devtask_core::TaskCommand;

pub fn print_plan(task: &str, commands: &[TaskCommand]) {
    println!("📋 Plan for `{}`: {} command(s)", task, commands.len());

    for (i, command) in commands.iter().enumerate() {
        println!();
        println!("{}. {}", i + 1, command.to_shell_command());
        print_command_breakdown(command);
    }
}

pub fn print_command_breakdown(command: &TaskCommand) {
    println!("   🔧 Command breakdown:");

    for (i, stage) in command.stages().into_iter().enumerate() {
        if i > 0 {
            println!("      • piped into:");
        }
        println!("      • command: {}", stage.program);

        match stage.program.as_str() {
            "docker" => {
                let run = parse_docker_run(&stage.args);
                if let Some(image) = run.image {
                    println!("      • image: {}", image);
                }
                for mount in run.mounts {
                    println!("      • mount: {}", mount);
                }
                if let Some(workdir) = run.workdir {
                    println!("      • workdir: {}", workdir);
                }
                if !run.inner.is_empty() {
                    println!("      • runs: {}", run.inner.join(" "));
                }
            }
            _ => {
                if !stage.args.is_empty() {
                    println!("      • args: {:?}", stage.args);
                }
            }
        }
    }

    if command.echo {
        println!("      • echoed before running");
    }
}

/// The interesting parts of a `docker run` argument list
#[derive(Debug, Default, PartialEq)]
pub struct DockerRun {
    pub image: Option<String>,
    pub mounts: Vec<String>,
    pub workdir: Option<String>,
    /// Command run inside the container
    pub inner: Vec<String>,
}

pub fn parse_docker_run(args: &[String]) -> DockerRun {
    let mut run = DockerRun::default();

    let mut i = 0;
    // Skip the `run` subcommand
    if args.first().map(String::as_str) == Some("run") {
        i = 1;
    }

    while i < args.len() {
        let arg = &args[i];

        if run.image.is_some() {
            run.inner.push(arg.clone());
        } else if (arg == "-v" || arg == "--volume") && i + 1 < args.len() {
            run.mounts.push(args[i + 1].clone());
            i += 1;
        } else if (arg == "-w" || arg == "--workdir") && i + 1 < args.len() {
            run.workdir = Some(args[i + 1].clone());
            i += 1;
        } else if !arg.starts_with('-') {
            run.image = Some(arg.clone());
        }

        i += 1;
    }

    run
}
