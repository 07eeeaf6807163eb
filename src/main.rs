// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::process;

use tracing_subscriber::EnvFilter;
use wasm_parser_bridge::extractor::{extract, naming, read_artifact, Descriptor};
use wasm_parser_bridge::generator;
use wasm_parser_bridge::manifest::Manifest;

fn usage(program: &str) -> ! {
    eprintln!("Usage: {} generate <config.yaml|config.toml>", program);
    eprintln!("       {} describe <manifest.json> <artifact.wasm>", program);
    eprintln!("Example: {} generate bindings.yaml", program);
    eprintln!("Example: {} describe manifests/http.json build/parser.wasm", program);
    process::exit(1);
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("wasm-parser-bridge");

    let result = match args.get(1).map(String::as_str) {
        Some("generate") if args.len() == 3 => generate(&args[2]),
        Some("describe") if args.len() == 4 => describe(&args[2], &args[3]),
        _ => usage(program),
    };

    if let Err(error) = result {
        eprintln!("❌ {}", error);
        process::exit(1);
    }
}

fn generate(config_path: &str) -> anyhow::Result<()> {
    let modules = generator::run(config_path)?;

    println!("✅ Generated {} binding module(s)", modules.len());
    for module in &modules {
        println!(
            "   • {} → {} ({} bytes)",
            module.profile,
            module.output.display(),
            module.source.len()
        );
    }
    Ok(())
}

fn describe(manifest_path: &str, artifact_path: &str) -> anyhow::Result<()> {
    let manifest = Manifest::load(manifest_path)?;
    let artifact = read_artifact(artifact_path)?;
    let descriptor = extract(&manifest, &artifact)?;
    print_descriptor(&descriptor)?;
    Ok(())
}

fn print_descriptor(descriptor: &Descriptor) -> anyhow::Result<()> {
    println!("📦 Guest surface (manifest version {})", descriptor.version);
    println!("═══════════════════════════════════");

    println!("Flags:");
    for (name, value) in &descriptor.flags {
        println!("   {} = {}", name, value);
    }

    println!("Getters:");
    for getter in &descriptor.getters {
        println!("   {} -> {}", getter.export, getter.class);
    }

    println!("Setters:");
    for setter in &descriptor.setters {
        println!("   {} ({})", setter.export, if setter.wide { "i64" } else { "i32" });
    }

    println!("Actions:");
    for action in &descriptor.actions {
        println!("   {}", action.export_name());
    }

    println!("Callbacks ({}):", descriptor.callbacks.len());
    for callback in &descriptor.callbacks {
        println!("   [{:>2}] {}", callback.slot, callback.name);
    }

    println!("Enums:");
    for family in &descriptor.enums {
        println!(
            "   {} ({} members)",
            naming::family_module(&family.prefix),
            family.members.len()
        );
    }

    println!("Imports:");
    for import in &descriptor.imports {
        println!("   {}.{} => {}", import.module, import.name, import.role);
    }

    println!(
        "Callback error code: {}",
        descriptor.callback_error_code()?
    );
    Ok(())
}
