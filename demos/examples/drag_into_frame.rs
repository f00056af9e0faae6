// Copyright 2025 the Easel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dragging a note into nested frames, then moving a selection.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p easel_demos --example drag_into_frame`

use std::collections::HashMap;

use easel_coords::{CoordinateService, DragOutcome, Element, ElementId, TransformError};
use kurbo::{Point, Size, Vec2};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), TransformError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let board = ElementId(1);
    let column = ElementId(2);
    let mut containers = HashMap::new();
    containers.insert(
        board,
        Element::new(board, Point::new(100.0, 100.0), Size::new(800.0, 600.0)),
    );
    containers.insert(
        column,
        Element::new(column, Point::new(20.0, 60.0), Size::new(200.0, 500.0))
            .with_owner(board)
            .with_z_index(1),
    );

    let mut coords = CoordinateService::default();
    let mut note = Element::new(ElementId(10), Point::new(950.0, 80.0), Size::new(80.0, 60.0));

    for drop in [
        Point::new(500.0, 300.0),
        Point::new(150.0, 200.0),
        Point::new(160.0, 210.0),
        Point::new(1200.0, 50.0),
    ] {
        let conv = coords.convert_drag_coordinates(&note, drop, &containers)?;
        match conv.outcome {
            DragOutcome::Entered { container } => println!("drop {drop:?}: entered {container}"),
            DragOutcome::Left { container } => println!("drop {drop:?}: left {container}"),
            DragOutcome::Unchanged => println!("drop {drop:?}: same owner"),
        }
        if let Some(owner) = conv.owner {
            let section = &containers[&owner];
            let clamped = coords.constrain_to_section(conv.position, &note, section, 8.0);
            note.position = clamped;
        } else {
            note.position = conv.position;
        }
        note.owner = conv.owner;
        coords.invalidate_element(note.id);
        println!(
            "  local {:?}, absolute {:?}",
            note.position,
            coords.to_absolute(&note, &containers)?
        );
    }

    // Move the column together with a loose note; the column's children ride along.
    let selection = [containers[&column].clone(), note.clone()];
    let moved = coords.batch_apply_delta(&selection, Vec2::new(40.0, 0.0), &containers)?;
    for (id, local) in &moved {
        println!("{id} -> local {local:?}");
        if let Some(c) = containers.get_mut(id) {
            c.position = *local;
        }
    }
    Ok(())
}
