use chatworkhook::{Result, compute_signature, config};

use super::{BodyArgs, read_body};

pub fn execute(args: BodyArgs) -> Result<()> {
    let config = config::load()?;
    let raw = read_body(args.body.as_deref())?;
    println!("{}", compute_signature(config.token()?, &raw)?);
    Ok(())
}
