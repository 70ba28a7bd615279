//! Example: Decode and inspect a triangulation blob.
//!
//! Run with: cargo run --example inspect_blob -- shape.bin
//!
//! The blob is also converted as a single unstyled instance so the Y-up
//! scene bounds can be compared with the raw Z-up ones.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use shapescene_core::{decode, GeometryLabel, InstanceLabel, MemoryContext, ShapeInstance};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_blob <path-to-blob>");
        println!("\nExample:");
        println!("  cargo run --example inspect_blob -- shape.bin");
        return Ok(());
    }

    let path = &args[1];
    println!("Reading triangulation blob: {}", path);

    let blob = fs::read(path).with_context(|| format!("Failed to read {}", path))?;
    let mesh = decode(&blob).with_context(|| format!("Failed to decode {}", path))?;

    println!("\n=== Blob: {} bytes ===", blob.len());
    println!("Version: {}", mesh.version);
    println!("Vertices: {}", mesh.vertex_count());
    println!("Faces: {}", mesh.faces.len());
    println!("Triangles: {}", mesh.triangle_count());

    println!("\n--- Faces ---");
    for (i, face) in mesh.faces.iter().enumerate() {
        println!(
            "  [{}] {} triangles, {} normals",
            i,
            face.triangle_count,
            if face.normals.is_planar() { "planar" } else { "per-vertex" }
        );
    }

    if let Some((min, max)) = mesh.bounds() {
        println!("\n--- Source Bounds (Z-up) ---");
        println!("  Min: ({:.3}, {:.3}, {:.3})", min.x, min.y, min.z);
        println!("  Max: ({:.3}, {:.3}, {:.3})", max.x, max.y, max.z);
    }

    let context = MemoryContext::new()
        .with_blob(GeometryLabel(1), blob)
        .with_instance(ShapeInstance::new(InstanceLabel(1), GeometryLabel(1)));
    let (scene, warnings) = shapescene_core::run(&context);

    for warning in &warnings {
        eprintln!("Warning: {}", warning);
    }

    let bounds = scene.world_bounds();
    if !bounds.is_empty() {
        println!("\n--- Scene Bounds (Y-up) ---");
        println!(
            "  Min: ({:.3}, {:.3}, {:.3})",
            bounds.x.min, bounds.y.min, bounds.z.min
        );
        println!(
            "  Max: ({:.3}, {:.3}, {:.3})",
            bounds.x.max, bounds.y.max, bounds.z.max
        );
        let size = bounds.extent();
        println!("  Size: {:.3} x {:.3} x {:.3}", size.x, size.y, size.z);
    }

    Ok(())
}
