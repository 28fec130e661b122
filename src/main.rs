use anyhow::{Context as _, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use inkwell::context::Context;
use std::fs;
use std::path::PathBuf;

use wist::codegen::CompiledFunction;
use wist::compiler::{CompilationPipeline, CompilationState, CompilerOptions};
use wist::lexer::format_tokens;

#[derive(Parser)]
#[command(name = "wist")]
#[command(author, version, about = "The Wist language compiler", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EmitType {
    /// Emit the stack-machine instruction listing
    #[value(name = "instructions")]
    Instructions,
    /// Emit LLVM IR (.ll)
    #[value(name = "llvm-ir")]
    LlvmIr,
    /// Emit assembly (.s)
    #[value(name = "asm")]
    Asm,
    /// Emit object file (.o)
    #[value(name = "obj")]
    Obj,
}

/// Flags shared by `run` and `eval`
#[derive(Args, Clone, Copy, Debug)]
struct RunFlags {
    /// Optimization level (0-3)
    #[arg(short = 'O', long, default_value = "0", value_parser = clap::value_parser!(u8).range(0..=3))]
    opt_level: u8,

    /// Dump tokens to stdout
    #[arg(long)]
    dump_tokens: bool,

    /// Dump the AST to stdout
    #[arg(long)]
    dump_ast: bool,

    /// Dump the instruction listing to stdout
    #[arg(long)]
    dump_instructions: bool,

    /// Dump the LLVM IR to stdout
    #[arg(long)]
    dump_ir: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile and run a Wist source file
    Run {
        /// The source file to run
        input: PathBuf,

        #[command(flatten)]
        flags: RunFlags,
    },

    /// Compile and run an inline source string
    Eval {
        /// The program source
        source: String,

        #[command(flatten)]
        flags: RunFlags,
    },

    /// Check a Wist source file for errors without running it
    Check {
        /// The source file to check
        input: PathBuf,
    },

    /// Compile a Wist source file and write an artifact
    Emit {
        /// The source file to compile
        input: PathBuf,

        /// What to emit
        #[arg(long = "emit", value_enum, default_value = "llvm-ir")]
        emit: EmitType,

        /// Output file (stdout for instructions when omitted)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,

        /// Optimization level (0-3)
        #[arg(short = 'O', long, default_value = "2", value_parser = clap::value_parser!(u8).range(0..=3))]
        opt_level: u8,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter)).init();

    let result = match cli.command {
        Commands::Run { input, flags } => {
            let state = CompilationState::new(&input)?;
            run(state, flags, cli.verbose)
        }
        Commands::Eval { source, flags } => {
            let state = CompilationState::new_from_string("<eval>", source)?;
            run(state, flags, cli.verbose)
        }
        Commands::Check { input } => check(input, cli.verbose),
        Commands::Emit {
            input,
            emit,
            output,
            opt_level,
        } => emit_artifact(input, emit, output, opt_level, cli.verbose),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "error".red().bold(), e);
        std::process::exit(1);
    }

    Ok(())
}

/// Which intermediate results to print while compiling
#[derive(Default, Clone, Copy)]
struct Dumps {
    tokens: bool,
    ast: bool,
    instructions: bool,
}

/// Run the front end and the core compiler, reporting diagnostics on failure.
fn compile_to_instructions(pipeline: &mut CompilationPipeline<'_>, dumps: Dumps) -> Result<CompiledFunction> {
    let tokens = pipeline.tokenize();

    if dumps.tokens {
        println!("{}", "=== Tokens ===".blue().bold());
        println!("{}", format_tokens(&tokens));
        println!();
    }

    if pipeline.state().has_errors() {
        pipeline.report_errors()?;
        anyhow::bail!("Lexical analysis failed");
    }

    let Some(program) = pipeline.parse(tokens) else {
        pipeline.report_errors()?;
        anyhow::bail!("Parsing failed");
    };

    if dumps.ast {
        println!("{}", "=== AST ===".blue().bold());
        println!("{}", serde_json::to_string_pretty(&program)?);
        println!();
    }

    let Some(function) = pipeline.compile_program(&program) else {
        pipeline.report_errors()?;
        anyhow::bail!("Compilation failed");
    };

    if dumps.instructions {
        println!("{}", "=== Instructions ===".blue().bold());
        print!("{}", function);
        println!();
    }

    Ok(function)
}

fn run(state: CompilationState, flags: RunFlags, verbose: bool) -> Result<()> {
    log::info!("Running {}", state.source_file);

    let context = Context::create();
    let options = CompilerOptions {
        opt_level: flags.opt_level,
        verbose,
    };
    let mut pipeline = CompilationPipeline::new(state, &context, options);

    let dumps = Dumps {
        tokens: flags.dump_tokens,
        ast: flags.dump_ast,
        instructions: flags.dump_instructions,
    };
    let function = compile_to_instructions(&mut pipeline, dumps)?;

    let lowered = pipeline.lower(&function)?;
    if flags.dump_ir {
        println!("{}", "=== LLVM IR ===".blue().bold());
        println!("{}", lowered.ir());
    }

    let result = pipeline.execute(&lowered)?;
    println!("{}", result);
    Ok(())
}

fn check(input: PathBuf, verbose: bool) -> Result<()> {
    log::info!("Checking {:?}", input);

    let context = Context::create();
    let state = CompilationState::new(&input)?;
    let options = CompilerOptions {
        opt_level: 0,
        verbose,
    };
    let mut pipeline = CompilationPipeline::new(state, &context, options);

    let function = compile_to_instructions(&mut pipeline, Dumps::default())?;
    pipeline.lower(&function)?;

    println!("{}: No errors found", "success".green().bold());
    Ok(())
}

fn emit_artifact(
    input: PathBuf,
    emit: EmitType,
    output: Option<PathBuf>,
    opt_level: u8,
    verbose: bool,
) -> Result<()> {
    if verbose {
        println!(
            "{}: Compiling {:?} with optimization level O{}",
            "info".blue().bold(),
            input,
            opt_level
        );
    }

    let context = Context::create();
    let state = CompilationState::new(&input)?;
    let options = CompilerOptions { opt_level, verbose };
    let mut pipeline = CompilationPipeline::new(state, &context, options);

    let function = compile_to_instructions(&mut pipeline, Dumps::default())?;

    let default_output = |extension: &str| {
        let mut path = input.clone();
        path.set_extension(extension);
        path
    };

    match emit {
        EmitType::Instructions => match output {
            Some(path) => {
                fs::write(&path, function.to_string())
                    .with_context(|| format!("Failed to write {:?}", path))?;
                println!("{}: Created instruction listing {:?}", "success".green().bold(), path);
            }
            None => print!("{}", function),
        },
        EmitType::LlvmIr => {
            let path = output.unwrap_or_else(|| default_output("ll"));
            pipeline.lower(&function)?.write_llvm_ir(&path)?;
            println!("{}: Created LLVM IR file {:?}", "success".green().bold(), path);
        }
        EmitType::Asm => {
            let path = output.unwrap_or_else(|| default_output("s"));
            pipeline
                .lower(&function)?
                .write_assembly(&path, options.llvm_opt_level())?;
            println!("{}: Created assembly file {:?}", "success".green().bold(), path);
        }
        EmitType::Obj => {
            let path = output.unwrap_or_else(|| default_output("o"));
            pipeline
                .lower(&function)?
                .write_object_file(&path, options.llvm_opt_level())?;
            println!("{}: Created object file {:?}", "success".green().bold(), path);
        }
    }

    Ok(())
}
