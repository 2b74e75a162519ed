use chatworkhook::{HookError, Result, codec};

use super::{BodyArgs, read_body};

pub fn execute(args: BodyArgs) -> Result<()> {
    let raw = read_body(args.body.as_deref())?;
    let payload = codec::decode(&raw)?;
    let text = serde_json::to_string_pretty(&payload).map_err(HookError::Encode)?;
    println!("{text}");
    Ok(())
}
