//! Example: Using propchat as a library
//!
//! Run with: cargo run --example library_usage

use propchat::config::RuleExtensions;
use propchat::prelude::*;

const TRANSCRIPT: &str = "\
Messages and calls are end-to-end encrypted.
[24/05/2025, 1:39:50 AM] محمد فرج: للبيع في حي 19 مجاورة 1 مساحة 276 📱01092400709
[10/06/2025, 5:22:03 AM] +20 103 011 4411: Hello everyone
[11/06/2025, 9:00:00 AM] ~ Sara 🏠: شقة و فيلا للايجار
بالشيخ زايد
للتواصل 01111111111";

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("=== propchat Library Usage Examples ===\n");

    // Example 1: Process a transcript held in memory
    println!("1. Annotated records:");
    let mut pipeline = Pipeline::new()?;
    let records = pipeline.process_str("_chat.txt", TRANSCRIPT);

    for record in &records {
        println!(
            "   {} [{}] {} | phone: {} | status: {} | region: {} | type: {}",
            record.unique_id,
            record.line_number,
            if record.sender_name.is_empty() { "-" } else { &record.sender_name },
            record.sender_phone.as_deref().unwrap_or("-"),
            record.status_text(),
            record.region_text(),
            record.property_type_label(),
        );
    }

    // Example 2: Statistics
    println!("\n2. Run statistics:");
    print!("{}", pipeline.stats());

    // Example 3: Extending the rule tables
    println!("\n3. With extra rules:");
    let extensions = RuleExtensions::from_json_str(
        r#"{
            "status_rules": [{"keyword": "لقطة", "category": "offered", "language": "arabic"}],
            "region_rules": [{"keyword": "بيت الوطن", "category": "city", "language": "arabic"}]
        }"#,
    )?;
    println!("   Loaded {} extra rules", extensions.len());
    let config = ExtractionConfig::new()
        .with_extensions(extensions)
        .with_redact_phones(true);
    let mut custom = Pipeline::with_config(&config)?;
    let extra = custom.process_str(
        "offers.txt",
        "[12/06/2025, 8:15:00 PM] Omar: لقطة ارض في بيت الوطن 01092400709",
    );
    println!("   status: {}", extra[0].status_text());
    println!("   region: {}", extra[0].region_text());
    println!("   message (redacted): {}", extra[0].message);

    // Example 4: Output formats
    println!("\n4. CSV output:");
    let csv = to_csv(&records, &OutputConfig::new())?;
    for line in csv.lines().take(3) {
        println!("   {line}");
    }

    // Example 5: Write to a file picked by extension
    println!("\n5. Writing files:");
    let dir = std::env::temp_dir();
    for name in ["propchat_demo.csv", "propchat_demo.jsonl"] {
        let path = dir.join(name);
        let path = path.to_string_lossy();
        let format = OutputFormat::from_path(&*path)?;
        write_to_format(&records, &path, format, &OutputConfig::new())?;
        println!("   {format} -> {path}");
    }

    println!("\n=== Done ===");
    Ok(())
}
