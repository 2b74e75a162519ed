use chatworkhook::{HookError, Result, config, signature::decode_token};

pub fn execute() -> Result<()> {
    println!("Doctor checks:");
    let mut failures = Vec::new();

    match config::config_path() {
        Ok(path) if path.exists() => println!("✅ config file present ({})", path.display()),
        Ok(path) => println!("⚠️ config file missing ({})", path.display()),
        Err(err) => {
            println!("❌ config path unavailable ({err})");
            failures.push("config path unavailable".to_string());
        }
    }

    let config = config::load()?;
    println!("✅ signature header: {}", config.signature_header);
    match config.token() {
        Ok(token) => {
            println!("✅ webhook token configured");
            match decode_token(token) {
                Ok(key) => println!("✅ webhook token is base64 ({} key bytes)", key.len()),
                Err(_) => {
                    println!("❌ webhook token is not base64");
                    failures.push("webhook token is not base64".to_string());
                }
            }
        }
        Err(_) => {
            println!("❌ webhook token missing");
            failures.push("webhook token missing".to_string());
        }
    }

    if failures.is_empty() {
        println!("Healthy ✅");
        Ok(())
    } else {
        Err(HookError::DoctorUnhealthy(failures.join("; ")))
    }
}
