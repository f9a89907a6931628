use std::cell::Cell;
use std::sync::LazyLock;

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{
    BufferQueue, StartTag, TagToken, Token, TokenSink, TokenSinkResult, Tokenizer,
    TokenizerOpts,
};
use scraper::{ElementRef, Html, Selector};

use super::text::{is_blank, normalize, or_empty};
use crate::events::Event;

static TABLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("table").unwrap());
static TBODY: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tbody").unwrap());
static TR: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr").unwrap());
static TD: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td").unwrap());
static SPEAKER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.title").unwrap());
static LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("a").unwrap());
static ABSTRACT: LazyLock<Selector> = LazyLock::new(|| Selector::parse("div.abstract").unwrap());

/// Cells read per row: date, speaker, title, abstract.
const COLUMNS: usize = 4;

/// Extract event rows from the first `<table>` in `html`.
/// No table means no events; malformed rows are dropped silently.
pub fn extract(html: &str) -> Vec<Event> {
    let document = Html::parse_document(html);
    let Some(table) = document.select(&TABLE).next() else {
        return Vec::new();
    };

    data_rows(html, table)
        .into_iter()
        .filter_map(row_to_event)
        .collect()
}

/// The tree builder always inserts a `<tbody>`, so whether the author marked up
/// sections is only visible in the source. Unsectioned tables lead with a header row.
fn data_rows<'a>(html: &str, table: ElementRef<'a>) -> Vec<ElementRef<'a>> {
    if declares_sections(html) {
        if let Some(body) = table.select(&TBODY).next() {
            return body.select(&TR).collect();
        }
    }
    table.select(&TR).skip(1).collect()
}

/// Tokenize the source and report whether the first real table opens a
/// `<tbody>` or `<thead>` before it closes. Comments and raw-text elements
/// (`<script>`, `<style>`, ...) never contribute tags.
fn declares_sections(html: &str) -> bool {
    let input = BufferQueue::default();
    input.push_back(StrTendril::from_slice(html));

    let tokenizer = Tokenizer::new(SectionScan::default(), TokenizerOpts::default());
    let _ = tokenizer.feed(&input);
    tokenizer.end();
    tokenizer.sink.found.get()
}

#[derive(Default)]
struct SectionScan {
    /// Open `<table>` elements; zero before the first table and after it closes.
    depth: Cell<u32>,
    done: Cell<bool>,
    found: Cell<bool>,
}

impl TokenSink for SectionScan {
    type Handle = ();

    fn process_token(&self, token: Token, _line_number: u64) -> TokenSinkResult<()> {
        let TagToken(tag) = token else {
            return TokenSinkResult::Continue;
        };
        let name: &str = &tag.name;

        if tag.kind == StartTag {
            match name {
                "script" => return TokenSinkResult::RawData(RawKind::ScriptData),
                "style" | "xmp" | "iframe" | "noembed" | "noframes" => {
                    return TokenSinkResult::RawData(RawKind::Rawtext)
                }
                "textarea" | "title" => return TokenSinkResult::RawData(RawKind::Rcdata),
                "plaintext" => return TokenSinkResult::Plaintext,
                _ => {}
            }
        }
        if self.done.get() {
            return TokenSinkResult::Continue;
        }

        let depth = self.depth.get();
        match (tag.kind, name) {
            (StartTag, "table") => self.depth.set(depth + 1),
            (StartTag, "tbody" | "thead") if depth > 0 => self.found.set(true),
            (_, "table") if depth > 0 => {
                self.depth.set(depth - 1);
                self.done.set(depth == 1);
            }
            _ => {}
        }
        TokenSinkResult::Continue
    }
}

fn row_to_event(row: ElementRef<'_>) -> Option<Event> {
    let cells: Vec<ElementRef<'_>> = row.select(&TD).take(COLUMNS).collect();
    if cells.len() < COLUMNS {
        return None;
    }

    let date = text_of(cells[0]);
    let speaker = preferred_text(cells[1], &SPEAKER);
    if is_blank(&date) || is_blank(&speaker) {
        return None;
    }

    Some(Event {
        date,
        speaker,
        title: or_empty(preferred_text(cells[2], &LINK)),
        abstract_text: or_empty(preferred_text(cells[3], &ABSTRACT)),
    })
}

/// Text of the first descendant matching `selector`, falling back to the whole cell.
fn preferred_text(cell: ElementRef<'_>, selector: &Selector) -> String {
    cell.select(selector)
        .next()
        .map(text_of)
        .unwrap_or_else(|| text_of(cell))
}

fn text_of(el: ElementRef<'_>) -> String {
    normalize(&el.text().collect::<String>())
}
