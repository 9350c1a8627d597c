use gemini_generate::{Client, Config, SafetySettingsBuilder};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let client = Client::from_env()?;

    let mut req = client.generate_content("Write a function to calculate the factorial of a number.");
    req.safety_settings(
        SafetySettingsBuilder::new()
            .harassment_only_high()
            .dangerous_content_medium_and_above()
            .build(),
    )
    .generation_config(Config::precise_generation_config());

    let envelope = req.await;
    println!("Status: {}", envelope.status);
    if let Some(response) = envelope.body {
        println!("Response: {response}");
    }

    Ok(())
}
