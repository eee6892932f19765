use clap::Parser;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use serde_json::{Value, json};
use std::fs;

/// A CLI tool to generate messy generator responses for the Goryu pipeline
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_proposal.json")]
    output: String,

    /// Number of shapes to propose
    #[arg(long, default_value_t = 12)]
    shapes: usize,

    /// Number of connections to propose
    #[arg(long, default_value_t = 10)]
    connections: usize,

    /// Probability (0.0 to 1.0) that a record is damaged in some way
    #[arg(long, default_value_t = 0.2)]
    noise: f64,

    /// Seed for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

const CLASS_NAMES: &[&str] = &[
    "Order", "Customer", "Invoice", "Product", "Payment", "Shipment", "Address", "Cart",
    "Discount", "Warehouse", "Supplier", "Review",
];
const TYPES: &[&str] = &["string", "number", "boolean", "Date", "UUID", "List<Item>"];
const SHAPE_KINDS: &[&str] = &["class", "interface", "abstract", "enum", "Abstract Class", "widget"];
const CONNECTION_KINDS: &[&str] = &[
    "association", "aggregation", "composition", "inheritance", "implements", "uses", "friendship",
];
const VISIBILITIES: &[&str] = &["+", "-", "#", "~", "public", "private"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if !(0.0..=1.0).contains(&cli.noise) {
        eprintln!("Error: --noise ({}) must be between 0.0 and 1.0", cli.noise);
        std::process::exit(1);
    }

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    println!(
        "Generating proposal ({} shapes, {} connections, noise {})...",
        cli.shapes, cli.connections, cli.noise
    );

    let mut elements = Vec::with_capacity(cli.shapes + cli.connections);
    let mut shape_ids = Vec::with_capacity(cli.shapes);
    for index in 0..cli.shapes {
        let id = format!("class_{}", index);
        elements.push(generate_shape(&mut rng, &id, index, cli.noise));
        shape_ids.push(id);
    }
    println!("-> Generated {} shape record(s).", cli.shapes);

    for index in 0..cli.connections {
        elements.push(generate_connection(&mut rng, index, &shape_ids, cli.noise));
    }
    println!("-> Generated {} connection record(s).", cli.connections);

    // Generators like to repeat themselves.
    if !elements.is_empty() && rng.random_bool(cli.noise) {
        if let Some(repeat) = elements.choose(&mut rng).cloned() {
            elements.push(repeat);
            println!("-> Repeated one record verbatim.");
        }
    }

    let envelope_key = if rng.random_bool(0.8) { "elements" } else { "items" };
    let proposal = json!({ envelope_key: elements });
    fs::write(&cli.output, serde_json::to_string_pretty(&proposal)?)?;

    println!(
        "Successfully generated and saved proposal to '{}'",
        cli.output
    );
    Ok(())
}

fn generate_shape<R: Rng>(rng: &mut R, id: &str, index: usize, noise: f64) -> Value {
    let base = CLASS_NAMES[index % CLASS_NAMES.len()];
    let name = if index < CLASS_NAMES.len() {
        base.to_string()
    } else {
        format!("{}{}", base, index / CLASS_NAMES.len())
    };

    let attributes: Vec<Value> = (0..rng.random_range(0..4))
        .map(|i| generate_member(rng, &format!("field{}", i)))
        .collect();
    let methods: Vec<Value> = (0..rng.random_range(0..3))
        .map(|i| {
            json!({
                "name": format!("action{}", i),
                "returnType": TYPES.choose(rng).copied().unwrap_or("void"),
                "visibility": VISIBILITIES.choose(rng).copied().unwrap_or("+"),
                "parameters": ["input: string"],
            })
        })
        .collect();

    let mut data = json!({
        "id": id,
        "name": name,
        "classType": SHAPE_KINDS.choose(rng).copied().unwrap_or("class"),
        "attributes": attributes,
        "methods": methods,
    });
    if rng.random_bool(0.5) {
        data["position"] = json!({
            "x": rng.random_range(0..20) * 50,
            "y": rng.random_range(0..12) * 50,
        });
    }

    if rng.random_bool(noise) {
        damage_shape(rng, &mut data);
    }
    json!({ "type": "element", "data": data })
}

fn generate_member<R: Rng>(rng: &mut R, name: &str) -> Value {
    let visibility = VISIBILITIES.choose(rng).copied().unwrap_or("+");
    let type_name = TYPES.choose(rng).copied().unwrap_or("string");
    if rng.random_bool(0.5) {
        json!(format!("{}{}: {}", visibility, name, type_name))
    } else {
        json!({ "name": name, "type": type_name, "visibility": visibility })
    }
}

fn damage_shape<R: Rng>(rng: &mut R, data: &mut Value) {
    match rng.random_range(0..4) {
        0 => data["name"] = json!("Unnamed"),
        1 => data["name"] = json!("   "),
        2 => {
            if let Some(object) = data.as_object_mut() {
                object.remove("id");
            }
        }
        _ => data["attributes"] = json!([42, null, "+ok: string"]),
    }
}

fn generate_connection<R: Rng>(rng: &mut R, index: usize, shape_ids: &[String], noise: f64) -> Value {
    let source = shape_ids.choose(rng).cloned().unwrap_or_default();
    let mut target = shape_ids.choose(rng).cloned().unwrap_or_default();
    if rng.random_bool(noise) {
        target = format!("ghost_{}", index);
    }

    let data = json!({
        "id": format!("rel_{}", index),
        "source": source,
        "target": target,
        "relationshipType": CONNECTION_KINDS.choose(rng).copied().unwrap_or("association"),
        "sourceMultiplicity": (["1", "0..1", "*", "1..*"].choose(rng).copied().unwrap_or("1")),
    });
    json!({ "type": "relationship", "data": data })
}
