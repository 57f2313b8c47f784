//! Static fact-sheet cards shown inside the presenter.

use serde::Deserialize;

/// Identity of the presented nation plus the asset files next to the script.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Preset {
    pub nation_name: String,
    pub motto: String,
    pub capital: String,
    pub govt: String,
    pub map_file: String,
    pub flag_file: String,
}

impl Default for Preset {
    fn default() -> Self {
        Self {
            nation_name: "Lajelândia".into(),
            motto: "Through Sea and Stone".into(),
            capital: "Port Ardent".into(),
            govt: "Unitary democratic socialist republic".into(),
            map_file: "Viena.map".into(),
            flag_file: "flag.png".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FlagStripe {
    pub title: String,
    pub text: String,
}

impl FlagStripe {
    fn new(title: &str, text: &str) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Facts {
    pub flag_meaning: Vec<FlagStripe>,
    pub territory: String,
    pub population: String,
    pub language: String,
    pub currency: String,
    pub literacy: String,
    pub economy: String,
    pub culture: String,
    pub sports: String,
    pub environment: String,
    pub system_of_government: String,
    pub type_of_government: String,
    pub economic_system: String,
}

impl Default for Facts {
    fn default() -> Self {
        Self {
            flag_meaning: vec![
                FlagStripe::new(
                    "Green (top stripe)",
                    "Natural landscapes, agriculture, and harmony between people and nature.",
                ),
                FlagStripe::new(
                    "Yellow (middle stripe)",
                    "Prosperity, wealth, and hope for a bright future.",
                ),
                FlagStripe::new("Blue (bottom stripe)", "Peace, unity, and the oceans."),
                FlagStripe::new(
                    "Eight-Pointed Star (center)",
                    "Guiding light of the nation, diversity, and the unity of all its states.",
                ),
            ],
            territory: "~640,000 km²".into(),
            population: "~35 million inhabitants".into(),
            language: "Lajelês (inspired by Portuguese)".into(),
            currency: "Dólar lagiano (LJ$)".into(),
            literacy: "97%".into(),
            economy: "Sustainable agriculture, technology, responsible mining, cultural tourism"
                .into(),
            culture: "Musical diversity, national festivals, strong literary tradition".into(),
            sports: "Surfing and Jiu Jitsu".into(),
            environment: "40% of the territory protected by natural reserves".into(),
            system_of_government: "Unitary".into(),
            type_of_government: "Democracy".into(),
            economic_system: "Mixed economy".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bullet {
    pub label: Option<String>,
    pub text: String,
    pub children: Vec<Bullet>,
}

impl Bullet {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            label: None,
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn labeled(label: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            text: text.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<Bullet>) -> Self {
        self.children = children;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Bullets(Vec<Bullet>),
    /// Flag image next to the colour meanings.
    Flag {
        src: String,
        alt: String,
        stripes: Vec<Bullet>,
    },
    /// The load button; its id must stay stable for event binding.
    LoadButton {
        id: String,
        tooltip: String,
        note: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub title: String,
    pub block: Block,
    /// Card spans two grid columns.
    pub wide: bool,
}

impl Card {
    fn new(title: &str, block: Block) -> Self {
        Self {
            title: title.into(),
            block,
            wide: false,
        }
    }

    fn wide(mut self) -> Self {
        self.wide = true;
        self
    }
}

/// Build the card list in display order.
pub fn fact_sheet(
    preset: &Preset,
    facts: &Facts,
    flag_url: &str,
    load_button_id: &str,
) -> Vec<Card> {
    let stripes = facts
        .flag_meaning
        .iter()
        .map(|s| Bullet::labeled(format!("{}:", s.title), s.text.as_str()))
        .collect();

    vec![
        Card::new(
            "Flag & National Identity",
            Block::Flag {
                src: flag_url.into(),
                alt: format!("Flag of {}", preset.nation_name),
                stripes,
            },
        )
        .wide(),
        Card::new(
            "Geography & Territory",
            Block::Bullets(vec![
                Bullet::labeled(
                    "3D Map:",
                    "Interactive terrain, coastline, and relief (see viewer above)",
                ),
                Bullet::labeled("Area:", facts.territory.as_str()),
                Bullet::labeled("Climate:", "Tropical → subtropical islands"),
                Bullet::labeled("Protected Areas:", facts.environment.as_str()),
            ]),
        ),
        Card::new(
            "Origins of the State",
            Block::Bullets(vec![
                Bullet::plain("Founded through a social contract uniting coastal communities"),
                Bullet::plain("Shared principles: sustainability, prosperity, equality"),
                Bullet::plain("Constitution ratified at independence"),
            ]),
        ),
        Card::new(
            "Government System",
            Block::Bullets(vec![
                Bullet::labeled("Form:", preset.govt.as_str()),
                Bullet::labeled("Capital:", preset.capital.as_str()),
                Bullet::labeled("System:", facts.system_of_government.as_str()),
                Bullet::labeled("Type:", facts.type_of_government.as_str()),
                Bullet::labeled("Constitutional Principles:", "").with_children(vec![
                    Bullet::plain("Free & fair elections"),
                    Bullet::plain("Freedom of speech & religion"),
                    Bullet::plain("Right to education & healthcare"),
                    Bullet::plain("Environmental protection"),
                    Bullet::plain("Equality before the law"),
                ]),
            ]),
        ),
        Card::new(
            "Functions of Government",
            Block::Bullets(vec![
                Bullet::labeled("Leadership:", "Elected parliament & president"),
                Bullet::labeled("Order:", "Independent judiciary, national police"),
                Bullet::labeled(
                    "Public Services:",
                    "Healthcare, education, ports & coastal infrastructure",
                ),
                Bullet::labeled(
                    "National Security:",
                    "Navy & Coast Guard for EEZ patrol, SAR, anti-smuggling",
                ),
                Bullet::labeled(
                    "Economic Security:",
                    "Mixed-economy regulation, maritime trade facilitation",
                ),
            ]),
        )
        .wide(),
        Card::new(
            "Economic System",
            Block::Bullets(vec![
                Bullet::labeled("Type:", facts.economic_system.as_str()),
                Bullet::labeled("Overview:", facts.economy.as_str()),
                Bullet::labeled("Main Sectors:", "").with_children(vec![
                    Bullet::plain("Sustainable agriculture"),
                    Bullet::plain("Technology & innovation (“blue tech” for oceans)"),
                    Bullet::plain("Responsible mining"),
                    Bullet::plain("Cultural tourism"),
                    Bullet::labeled(
                        "Maritime industries:",
                        "shipbuilding & repair, port logistics, fisheries, offshore wind",
                    ),
                ]),
                Bullet::labeled(
                    "Citizen Impact:",
                    format!(
                        "affordable services, entrepreneurship, stable {}",
                        facts.currency
                    ),
                ),
            ]),
        )
        .wide(),
        Card::new(
            "Society & Culture",
            Block::Bullets(vec![
                Bullet::labeled("Population:", facts.population.as_str()),
                Bullet::labeled("Language:", facts.language.as_str()),
                Bullet::labeled("Literacy:", facts.literacy.as_str()),
                Bullet::labeled("Religion:", "Pluralistic; freedom guaranteed"),
                Bullet::labeled(
                    "Maritime Identity:",
                    "seafaring heritage, coastal cuisine, island festivals",
                ),
                Bullet::labeled("Culture:", facts.culture.as_str()),
                Bullet::labeled(
                    "Sports:",
                    format!("{} (surf coast circuits & beach arenas)", facts.sports),
                ),
            ]),
        )
        .wide(),
        Card::new(
            "States / Provinces",
            Block::Bullets(vec![
                Bullet::plain("Unitary state with administrative provinces"),
                Bullet::plain("Examples: Ardent Coast, Verde Plateau, Azul Bay…"),
                Bullet::plain("Regions reflect coastal vs. interior identities"),
            ]),
        ),
        Card::new(
            "Military & Defense",
            Block::Bullets(vec![
                Bullet::labeled("Doctrine:", "Defensive, peace-oriented"),
                Bullet::labeled(
                    "Navy & Coast Guard:",
                    "EEZ patrol, search & rescue, maritime law enforcement",
                ),
                Bullet::labeled("Air Wing:", "coastal surveillance & disaster response"),
            ]),
        ),
        Card::new(
            "Controls",
            Block::LoadButton {
                id: load_button_id.into(),
                tooltip: preset.map_file.clone(),
                note: "3D viewer & map editor controls remain unchanged above.".into(),
            },
        ),
    ]
}

/// Escape text for interpolation into HTML markup.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn push_bullets(out: &mut String, bullets: &[Bullet]) {
    out.push_str("<ul>");
    for b in bullets {
        out.push_str("<li>");
        if let Some(label) = &b.label {
            out.push_str("<b>");
            out.push_str(&escape_html(label));
            out.push_str("</b>");
            if !b.text.is_empty() {
                out.push(' ');
            }
        }
        out.push_str(&escape_html(&b.text));
        out.push_str("</li>");
        if !b.children.is_empty() {
            push_bullets(out, &b.children);
        }
    }
    out.push_str("</ul>");
}

/// Inner HTML of one card (title plus body).
pub fn render_card(card: &Card) -> String {
    let mut out = format!("<h3>{}</h3>", escape_html(&card.title));
    match &card.block {
        Block::Bullets(bullets) => push_bullets(&mut out, bullets),
        Block::Flag { src, alt, stripes } => {
            out.push_str(&format!(
                r#"<div class="flag"><img src="{}" alt="{}">"#,
                escape_html(src),
                escape_html(alt)
            ));
            push_bullets(&mut out, stripes);
            out.push_str("</div>");
        }
        Block::LoadButton { id, tooltip, note } => {
            out.push_str(&format!(
                concat!(
                    r#"<div class="row"><button id="{}" class="ghost" title="{}">"#,
                    "Load map</button></div>"
                ),
                escape_html(id),
                escape_html(tooltip)
            ));
            out.push_str(&format!(
                r#"<div class="muted" style="margin-top:6px">{}</div>"#,
                escape_html(note)
            ));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sheet_has_ten_cards_ending_with_controls() {
        let cards = fact_sheet(&Preset::default(), &Facts::default(), "flag.png", "btnLoadMap");
        assert_eq!(cards.len(), 10);
        assert_eq!(cards[0].title, "Flag & National Identity");
        assert!(cards[0].wide);
        assert!(!cards[1].wide);
        match &cards[9].block {
            Block::LoadButton { id, tooltip, .. } => {
                assert_eq!(id, "btnLoadMap");
                assert_eq!(tooltip, "Viena.map");
            }
            other => panic!("unexpected block {other:?}"),
        }
    }

    #[test]
    fn render_escapes_text() {
        let card = Card::new(
            "A & B",
            Block::Bullets(vec![Bullet::labeled("Tag:", "<script>")]),
        );
        let html = render_card(&card);
        assert_eq!(
            html,
            "<h3>A &amp; B</h3><ul><li><b>Tag:</b> &lt;script&gt;</li></ul>"
        );
    }

    #[test]
    fn nested_bullets_render_inner_list() {
        let card = Card::new(
            "Gov",
            Block::Bullets(vec![
                Bullet::labeled("Principles:", "").with_children(vec![Bullet::plain("One")])
            ]),
        );
        assert_eq!(
            render_card(&card),
            "<h3>Gov</h3><ul><li><b>Principles:</b></li><ul><li>One</li></ul></ul>"
        );
    }

    #[test]
    fn flag_card_uses_resolved_url() {
        let cards = fact_sheet(
            &Preset::default(),
            &Facts::default(),
            "https://host/assets/flag.png",
            "btnLoadMap",
        );
        let html = render_card(&cards[0]);
        assert!(html.contains(r#"src="https://host/assets/flag.png""#));
        assert!(html.contains("Flag of Lajelândia"));
        assert!(html.contains("<b>Blue (bottom stripe):</b> Peace, unity, and the oceans."));
    }

    #[test]
    fn configured_identity_fields_reach_the_cards() {
        let preset = Preset {
            capital: "Harbourtown".into(),
            govt: "Federal republic".into(),
            ..Preset::default()
        };
        let facts = Facts {
            economy: "Fisheries".into(),
            currency: "Shell (SH)".into(),
            literacy: "88%".into(),
            ..Facts::default()
        };
        let html: Vec<String> = fact_sheet(&preset, &facts, "flag.png", "btnLoadMap")
            .iter()
            .map(render_card)
            .collect();
        assert!(html[3].contains("<b>Form:</b> Federal republic"));
        assert!(html[3].contains("<b>Capital:</b> Harbourtown"));
        assert!(html[5].contains("<b>Overview:</b> Fisheries"));
        assert!(html[5].contains("stable Shell (SH)"));
        assert!(html[6].contains("<b>Literacy:</b> 88%"));
    }

    #[test]
    fn facts_deserialize_with_defaults() {
        let facts: Facts = serde_json::from_str(r#"{"territory":"~1 km²"}"#).unwrap();
        assert_eq!(facts.territory, "~1 km²");
        assert_eq!(facts.flag_meaning.len(), 4);
    }
}
