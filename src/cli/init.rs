use secrecy::SecretString;
use tracing::info;

use chatworkhook::{Result, config, signature::decode_token};

use super::InitArgs;

pub fn execute(args: InitArgs) -> Result<()> {
    let token = args.token.trim().to_string();
    decode_token(token.as_bytes())?;

    let mut config = config::load().unwrap_or_default();
    config.webhook_token = Some(SecretString::from(token));
    config::save(&config)?;

    info!("init completed");
    println!("Webhook token saved ✅");
    println!(
        "Config saved at {}",
        config::config_path()
            .map(|v| v.display().to_string())
            .unwrap_or_else(|_| "<unknown>".to_string())
    );
    Ok(())
}
