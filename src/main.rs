//! modgen's main application entry point.
//! Handles command-line argument parsing, the questionnaire, and hands the
//! confirmed descriptor to the generator.

use modgen::{
    answers::{load_from_stdin, Answers},
    cli::{get_args, Args},
    config::{host_config_path, load_host_config, resolve_module_root, HostConfig},
    environment::SystemEnvironment,
    error::{default_error_handler, Error, Result},
    generator::{Generator, GeneratorOptions},
    loader::get_loader,
    logger::init_logger,
    prompt::{DialoguerPrompter, Prompter},
    questionnaire::{
        ask_kind, ask_module_directory, ask_rawname, complete_descriptor, confirm_descriptor,
    },
    template::{TemplateEngine, TokenRenderer},
};

/// Main application entry point.
fn main() {
    let args = get_args();
    init_logger(args.verbose);

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Works out where modules go: the command line first, then the host
/// configuration file, then the operator.
fn get_host_config(args: &Args, prompt: &dyn Prompter, preset: &Answers) -> Result<HostConfig> {
    if let Some(dir) = &args.module_dir {
        return Ok(HostConfig { module_directory: Some(dir.clone()), devmode: args.devmode });
    }

    if let Some(path) = host_config_path() {
        if let Some(config) = load_host_config(&path)? {
            return Ok(config);
        }
    }

    let dir = ask_module_directory(prompt, preset)?;
    let module_directory = if dir.as_os_str().is_empty() { None } else { Some(dir) };
    Ok(HostConfig { module_directory, devmode: false })
}

/// Main application logic execution.
///
/// # Flow
/// 1. Asks for the module kind and name
/// 2. Resolves and checks the module root
/// 3. Asks the remaining questions and confirms them
/// 4. Generates the module and runs the host steps
fn run(args: Args) -> Result<()> {
    let prompt = DialoguerPrompter::new();

    let preset = if args.stdin { args.answers().or(load_from_stdin()?) } else { args.answers() };

    let kind = ask_kind(&prompt, &preset)?;
    let rawname = ask_rawname(&prompt, &preset)?;

    let host_config = get_host_config(&args, &prompt, &preset)?;
    let cwd = std::env::current_dir().map_err(|e| Error::io(".", e))?;
    let root = resolve_module_root(&host_config, &rawname, &cwd)?;

    let descriptor = complete_descriptor(&prompt, &preset, kind, rawname)?;
    if !confirm_descriptor(&prompt, &descriptor, args.yes)? {
        println!("Nothing generated.");
        return Ok(());
    }

    let loader = get_loader(args.templates.as_deref())?;
    let renderer = TokenRenderer::new();
    let engine = TemplateEngine::new(loader.as_ref(), &renderer);
    let env = SystemEnvironment::new();

    let generator = Generator::new(
        &engine,
        &env,
        GeneratorOptions {
            devmode: host_config.devmode,
            skip_host_steps: args.skip_host_steps,
            owner: args.owner.clone(),
        },
    );
    let report = generator.generate(&descriptor, &root)?;

    for path in report.files.iter().chain(report.static_files.iter()) {
        println!("Created: '{}'", path.display());
    }
    println!("Module {} generated successfully in {}.", descriptor.rawname(), report.root.display());
    Ok(())
}
