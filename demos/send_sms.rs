use std::io;

use sergel::{ClientConfig, SergelClient};

fn required(name: &str) -> Result<String, io::Error> {
    std::env::var(name).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{name} environment variable is required"),
        )
    })
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = ClientConfig {
        username: required("SERGEL_USERNAME")?,
        password: required("SERGEL_PASSWORD")?,
        platform_id: required("SERGEL_PLATFORM_ID")?,
        platform_partner_id: required("SERGEL_PLATFORM_PARTNER_ID")?,
        base_url: required("SERGEL_BASE_URL")?,
        country_code: std::env::var("SERGEL_COUNTRY_CODE").ok(),
    };
    let sender = required("SERGEL_SENDER")?;
    let receiver = required("SERGEL_RECEIVER")?;
    let message = std::env::var("SERGEL_MESSAGE")
        .unwrap_or_else(|_| "Hello from the sergel demo.".to_owned());

    let client = SergelClient::new(config)?;
    if let Err(err) = client.send(&sender, &receiver, &message).await {
        if let Some(kind) = err.gateway_kind() {
            eprintln!("gateway rejected the message (code {}): {kind}", kind.code());
            if kind.is_auth_error() {
                eprintln!("check SERGEL_USERNAME and SERGEL_PASSWORD");
            }
        }
        return Err(err.into());
    }
    println!("message to {receiver} accepted");

    Ok(())
}
