//! End-to-end invocation flows driven by key presses and service messages
//! in their wire form.

use action_select::{
    decode_message, encode_request, Arguments, KeyOutcome, Palette, PaletteEvent, RequestId,
    ServiceRequest,
};
use pretty_assertions::assert_eq;
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const CATALOG: &str = r#"{"type":"catalog","id":1,"actions":{
    "files":{"name":"files","isInvocable":false,"actions":{
        "open":{"name":"open file","nameShort":"open","isInvocable":true},
        "save":{"name":"save file","isInvocable":true}
    }},
    "tabs":{"name":"tabs","isInvocable":false,"actions":{
        "move":{"name":"move tab","isInvocable":true}
    }}
}}"#;

fn receive(palette: &mut Palette, line: &str) -> Vec<PaletteEvent> {
    let message = decode_message(line)
        .expect("valid message")
        .expect("known message type");
    palette.handle_message(message)
}

fn press(palette: &mut Palette, code: KeyCode) -> Vec<PaletteEvent> {
    match palette.handle_key(KeyEvent::new(code, KeyModifiers::NONE)) {
        KeyOutcome::Consumed(events) => events,
        KeyOutcome::Ignored => panic!("{:?} was not handled", code),
    }
}

fn type_text(palette: &mut Palette, text: &str) -> Vec<PaletteEvent> {
    text.chars()
        .flat_map(|c| press(palette, KeyCode::Char(c)))
        .collect()
}

fn invocation(events: &[PaletteEvent]) -> (RequestId, String, Arguments) {
    events
        .iter()
        .find_map(|event| match event {
            PaletteEvent::Send(ServiceRequest::Invocation { id, key, args }) => {
                Some((*id, key.clone(), args.clone()))
            }
            _ => None,
        })
        .expect("an invocation request")
}

fn response(id: RequestId, argument_requests: &str) -> String {
    format!(
        r#"{{"type":"response","id":{},"argumentRequests":[{}]}}"#,
        id.0, argument_requests
    )
}

fn mounted() -> Palette {
    let mut palette = Palette::new();
    let events = palette.mount();
    let query = match events.as_slice() {
        [PaletteEvent::Send(request)] => encode_request(request).unwrap(),
        other => panic!("unexpected mount events {:?}", other),
    };
    assert_eq!(query, r#"{"type":"query","id":1}"#);

    receive(&mut palette, CATALOG);
    palette
}

#[test]
fn test_catalog_is_flattened_into_entries() {
    let palette = mounted();
    let rows: Vec<(&str, &str)> = palette
        .list()
        .entries()
        .iter()
        .map(|entry| (entry.key.as_str(), entry.name.as_str()))
        .collect();
    assert_eq!(
        rows,
        vec![
            ("files.open", "Open"),
            ("files.save", "Save file"),
            ("tabs.move", "Move tab"),
        ]
    );
}

#[test]
fn test_open_file_with_preset_argument() {
    let mut palette = mounted();

    // "op" leaves only files.open, which is submitted right away
    let events = type_text(&mut palette, "op");
    let (id, key, args) = invocation(&events);
    assert_eq!(key, "files.open");
    assert!(args.is_empty());
    assert_eq!(
        encode_request(&ServiceRequest::Invocation { id, key, args }).unwrap(),
        r#"{"type":"invocation","id":2,"key":"files.open","args":{}}"#
    );

    receive(
        &mut palette,
        &response(
            id,
            r#"{"param":"path","info":{"type":"string","presets":[{"id":"recent","name":"Recent"},{"id":"home","name":""}]}}"#,
        ),
    );
    assert_eq!(palette.prompt(), Some("path"));
    assert_eq!(palette.input(), "");
    let names: Vec<&str> = palette
        .list()
        .entries()
        .iter()
        .map(|entry| entry.name.as_str())
        .collect();
    assert_eq!(names, vec!["Recent", "home"]);

    press(&mut palette, KeyCode::Down);
    let events = press(&mut palette, KeyCode::Enter);
    let (id, key, args) = invocation(&events);
    assert_eq!(key, "files.open");
    assert_eq!(
        args,
        Arguments::from([("path".to_string(), "home".to_string())])
    );

    let events = receive(&mut palette, &response(id, ""));
    assert_eq!(
        events,
        vec![
            PaletteEvent::InvocationComplete {
                key: "files.open".to_string(),
                args,
            },
            PaletteEvent::Closed,
        ]
    );
    assert!(!palette.is_open());
}

#[test]
fn test_numeric_arguments_accumulate() {
    let mut palette = mounted();

    // Wrap from the first entry to tabs.move
    press(&mut palette, KeyCode::Up);
    let (id, key, _) = invocation(&press(&mut palette, KeyCode::Enter));
    assert_eq!(key, "tabs.move");

    receive(
        &mut palette,
        &response(id, r#"{"param":"from","info":{"type":"number"}}"#),
    );
    assert_eq!(palette.list().len(), 32);

    // "31" is unique among 0..=31
    let (id, key, args) = invocation(&type_text(&mut palette, "31"));
    assert_eq!(key, "tabs.move");
    assert_eq!(args.get("from").map(String::as_str), Some("31"));

    receive(
        &mut palette,
        &response(id, r#"{"param":"to","info":{"type":"number"}}"#),
    );
    type_text(&mut palette, "7");
    assert_eq!(palette.list().visible_len(), 3);
    let (id, key, args) = invocation(&press(&mut palette, KeyCode::Enter));
    assert_eq!(key, "tabs.move");
    assert_eq!(
        args,
        Arguments::from([
            ("from".to_string(), "31".to_string()),
            ("to".to_string(), "7".to_string()),
        ])
    );

    let events = receive(&mut palette, &response(id, "null"));
    assert!(matches!(
        events.as_slice(),
        [PaletteEvent::InvocationComplete { .. }, PaletteEvent::Closed]
    ));
}

#[test]
fn test_stray_messages_are_ignored() {
    let mut palette = mounted();
    let (id, _, _) = invocation(&press(&mut palette, KeyCode::Enter));

    // Unknown message types decode to nothing
    assert!(decode_message(r#"{"type":"progress","id":2}"#)
        .unwrap()
        .is_none());

    // Responses for ids nobody is waiting on
    assert!(receive(&mut palette, &response(RequestId(99), "")).is_empty());
    assert!(receive(&mut palette, CATALOG).is_empty());

    // Still waiting; the real response completes the flow
    assert_eq!(
        palette.handle_key(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE)),
        KeyOutcome::Ignored
    );
    let events = receive(&mut palette, &response(id, ""));
    assert!(events.contains(&PaletteEvent::Closed));
}

#[test]
fn test_catalog_order_follows_the_service() {
    let mut palette = Palette::new();
    palette.mount();
    receive(
        &mut palette,
        r#"{"type":"catalog","id":1,"actions":{
            "zoom":{"name":"zoom","isInvocable":false,"actions":{
                "out":{"name":"zoom out","isInvocable":true},
                "in":{"name":"zoom in","isInvocable":true}
            }},
            "files":{"name":"files","isInvocable":true}
        }}"#,
    );

    let keys: Vec<&str> = palette
        .list()
        .entries()
        .iter()
        .map(|entry| entry.key.as_str())
        .collect();
    assert_eq!(keys, vec!["zoom.out", "zoom.in", "files"]);

    let (_, key, _) = invocation(&press(&mut palette, KeyCode::Enter));
    assert_eq!(key, "zoom.out");
}
