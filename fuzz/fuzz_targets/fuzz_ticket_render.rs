#![no_main]

//! Fuzz target for ticket decoding and rendering.
//!
//! Titles, descriptions and names come from the server and may hold any
//! Unicode. Truncation and card formatting must never slice inside a
//! multi-byte character.

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use ticketdesk::commands::{list, show};
use ticketdesk::models::{Attachment, Category, Priority, Status, Ticket};

#[derive(Arbitrary, Debug)]
struct TicketInput {
    id: i64,
    title: String,
    description: String,
    category: Option<String>,
    assignee: Option<String>,
    attachments: Vec<(String, String)>,
    status: u8,
    priority: u8,
    width: u8,
    raw_json: String,
}

fuzz_target!(|input: TicketInput| {
    let ticket = Ticket {
        id: input.id,
        title: input.title.clone(),
        description: input.description,
        category_id: None,
        priority: Priority::ALL[input.priority as usize % Priority::ALL.len()],
        status: Status::ALL[input.status as usize % Status::ALL.len()],
        assigned_to_id: None,
        attachments: input
            .attachments
            .into_iter()
            .take(8)
            .enumerate()
            .map(|(i, (file_name, file_path))| Attachment {
                id: i as i64,
                file_name,
                file_path,
            })
            .collect(),
        category: input.category.map(|name| Category { id: 1, name }),
    };

    let _ = list::truncate(&input.title, input.width as usize);
    let _ = list::format_line(&ticket, input.assignee.as_deref());
    let _ = show::format_card(&ticket, input.assignee.as_deref());

    // server payloads are untrusted
    if let Ok(decoded) = serde_json::from_str::<Vec<Ticket>>(&input.raw_json) {
        for t in &decoded {
            let _ = list::format_line(t, None);
            let _ = show::format_card(t, None);
        }
    }

    // whatever we can render must also survive the wire format
    if let Ok(json) = serde_json::to_string(&ticket) {
        let back: Ticket = serde_json::from_str(&json).expect("ticket json round trip");
        assert_eq!(back, ticket);
    }
});
