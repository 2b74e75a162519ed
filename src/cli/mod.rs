mod decode;
mod doctor;
mod init;
mod sign;
mod verify;

use std::{
    fs::File,
    io::{self, Read},
    path::{Path, PathBuf},
};

use clap::{Args, Parser, Subcommand};
use tracing::info;

use chatworkhook::Result;

#[derive(Debug, Parser)]
#[command(
    name = "chatworkhook",
    version,
    about = "Verify and decode ChatWork webhook deliveries"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Check a delivery's signature and print its payload.
    Verify(VerifyArgs),
    /// Print the payload of a delivery without checking its signature.
    Decode(BodyArgs),
    /// Print the signature ChatWork would send for a body.
    Sign(BodyArgs),
    /// Store the webhook token.
    Init(InitArgs),
    Doctor,
}

#[derive(Debug, Args, Clone, Default)]
pub struct BodyArgs {
    /// File holding the raw request body; stdin when omitted.
    #[arg(long)]
    pub body: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct VerifyArgs {
    /// Value of the X-ChatWorkWebhookSignature header.
    #[arg(long)]
    pub signature: String,
    #[command(flatten)]
    pub body: BodyArgs,
}

#[derive(Debug, Args, Clone)]
pub struct InitArgs {
    #[arg(long)]
    pub token: String,
}

pub fn dispatch() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Verify(args) => verify::execute(args)?,
        Command::Decode(args) => decode::execute(args)?,
        Command::Sign(args) => sign::execute(args)?,
        Command::Init(args) => init::execute(args)?,
        Command::Doctor => doctor::execute()?,
    }
    info!("command completed");
    Ok(())
}

fn body_reader(path: Option<&Path>) -> Result<Box<dyn Read>> {
    match path {
        Some(path) => Ok(Box::new(File::open(path)?)),
        None => Ok(Box::new(io::stdin().lock())),
    }
}

fn read_body(path: Option<&Path>) -> Result<Vec<u8>> {
    let mut body = Vec::new();
    body_reader(path)?.read_to_end(&mut body)?;
    Ok(body)
}
