//! HTML views.
//!
//! Pages are plain server-rendered HTML. Every form that mutates a list
//! carries the owner explicitly as a hidden field.

use std::fmt::Write;

use axum::response::Html;
use swatch_core::{Item, Person, PersonId};

/// Escape text for use in element content and quoted attribute values.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
        escape(title)
    ))
}

/// `GET /`: the person list and the add/copy form.
pub fn dashboard(persons: &[Person]) -> Html<String> {
    let mut body = String::from("<h1>Lists</h1>\n<ul class=\"persons\">\n");
    for person in persons {
        let _ = writeln!(
            body,
            "<li><a href=\"/personsColours?id={id}\">{name}</a> <a class=\"delete\" href=\"/deletePerson?id={id}\">delete</a></li>",
            id = person.id,
            name = escape(&person.name),
        );
    }
    body.push_str("</ul>\n");
    body.push_str(concat!(
        "<form method=\"post\" action=\"/addPerson\">\n",
        "<input type=\"text\" name=\"person\" placeholder=\"Name\">\n",
        "<button type=\"submit\" name=\"action\" value=\"add\">Add</button>\n",
        "<button type=\"submit\" name=\"action\" value=\"copy\">Copy a list</button>\n",
        "</form>\n",
    ));
    page("Lists", &body)
}

/// `GET /personsColours`: one person's items with edit, delete, and add forms.
pub fn persons_colours(person: &Person, items: &[Item]) -> Html<String> {
    let owner = person.id;
    let mut body = format!(
        "<h1>{}</h1>\n<ul class=\"colours\">\n",
        escape(&person.name)
    );
    for item in items {
        let _ = writeln!(
            body,
            concat!(
                "<li><form method=\"post\" action=\"/editColour\">",
                "<input type=\"hidden\" name=\"id\" value=\"{id}\">",
                "<input type=\"hidden\" name=\"owner\" value=\"{owner}\">",
                "<input type=\"text\" name=\"colourField\" value=\"{value}\">",
                "<button type=\"submit\">Save</button></form> ",
                "<a class=\"delete\" href=\"/deleteColour?id={id}&amp;owner={owner}\">delete</a></li>",
            ),
            id = item.id,
            owner = owner,
            value = escape(&item.value),
        );
    }
    body.push_str("</ul>\n");
    let _ = write!(
        body,
        concat!(
            "<form method=\"post\" action=\"/addColour\">\n",
            "<input type=\"hidden\" name=\"owner\" value=\"{owner}\">\n",
            "<input type=\"text\" name=\"colour\" placeholder=\"Colour\">\n",
            "<button type=\"submit\">Add</button>\n",
            "</form>\n",
            "<p><a href=\"/\">All lists</a></p>\n",
        ),
        owner = owner,
    );
    page(&person.name, &body)
}

/// `GET /pickCopyList` and the copy branch of `POST /addPerson`.
pub fn copy_picker(persons: &[Person], new_list_name: Option<&str>) -> Html<String> {
    let mut body = String::from("<h1>Copy a list</h1>\n");
    if let Some(name) = new_list_name {
        let _ = writeln!(body, "<p>New list: <strong>{}</strong></p>", escape(name));
    }
    body.push_str("<form method=\"post\" action=\"/copyList\">\n");
    for person in persons {
        let _ = writeln!(
            body,
            "<label><input type=\"radio\" name=\"person\" value=\"{}\"> {}</label><br>",
            person.id,
            escape(&person.name),
        );
    }
    body.push_str("<button type=\"submit\">Copy</button>\n</form>\n<p><a href=\"/\">Cancel</a></p>\n");
    page("Copy a list", &body)
}

/// Location of a person's item list.
pub fn persons_colours_path(id: PersonId) -> String {
    format!("/personsColours?id={id}")
}
