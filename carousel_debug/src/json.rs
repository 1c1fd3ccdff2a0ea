// Copyright 2026 the Carousel Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes them as a JSON array, one object per event in recording order.
//! Every object carries a `seq` number and an `event` name; the remaining
//! keys mirror the event's fields.

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, RecordedPage, decode};

/// Exports recorded events as a JSON array.
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let events: Vec<Value> = decode(bytes)
        .enumerate()
        .map(|(seq, recorded)| to_value(seq, &recorded))
        .collect();

    serde_json::to_writer_pretty(&mut *writer, &events).map_err(io::Error::other)?;
    writeln!(writer)?;
    Ok(())
}

fn page(page: RecordedPage) -> Value {
    json!({
        "index": page.index,
        "generation": page.generation,
    })
}

fn to_value(seq: usize, recorded: &RecordedEvent) -> Value {
    match *recorded {
        RecordedEvent::PageAdded {
            page: p,
            position,
            source,
        } => json!({
            "seq": seq,
            "event": "PageAdded",
            "page": page(p),
            "position": position,
            "source": format!("{source:?}"),
        }),
        RecordedEvent::PagesRemoved {
            count,
            cancelled_fetches,
        } => json!({
            "seq": seq,
            "event": "PagesRemoved",
            "count": count,
            "cancelled_fetches": cancelled_fetches,
        }),
        RecordedEvent::SlotTransition {
            page: p,
            attempt,
            from,
            to,
        } => json!({
            "seq": seq,
            "event": "SlotTransition",
            "page": page(p),
            "attempt": attempt,
            "from": format!("{from:?}"),
            "to": format!("{to:?}"),
        }),
        RecordedEvent::StaleCompletion { page: p, attempt } => json!({
            "seq": seq,
            "event": "StaleCompletion",
            "page": page(p),
            "attempt": attempt,
        }),
        RecordedEvent::PageIndex { previous, current } => json!({
            "seq": seq,
            "event": "PageIndex",
            "previous": previous,
            "current": current,
        }),
        RecordedEvent::ScrollCommand {
            target_index,
            offset_x,
            animated,
        } => json!({
            "seq": seq,
            "event": "ScrollCommand",
            "target_index": target_index,
            "offset_x": offset_x,
            "animated": animated,
        }),
        RecordedEvent::Autoscroll { timer, kind } => json!({
            "seq": seq,
            "event": "Autoscroll",
            "timer": timer.0,
            "kind": format!("{kind:?}"),
        }),
    }
}
