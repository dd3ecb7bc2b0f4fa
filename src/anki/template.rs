use serde_json::{
    json,
    Value,
};

pub const DECK_NAME: &str = "Vocab Builder";
pub const MODEL_NAME: &str = "Custom: Vocab Builder";

pub const FIELD_SENTENCE: &str = "Sentence";
pub const FIELD_AUDIO: &str = "Audio";
pub const FIELD_IPA: &str = "IPA";
pub const FIELD_TRANSLATION: &str = "Translation";
pub const FIELD_NOTE: &str = "Note";
pub const FIELD_DB_ID: &str = "dbID";

/// Field order as created in the note model. Existing decks are never
/// upgraded if this changes; the deck name is the only bootstrap identity.
pub const FIELD_ORDER: [&str; 6] =
    [FIELD_SENTENCE, FIELD_AUDIO, FIELD_IPA, FIELD_TRANSLATION, FIELD_NOTE, FIELD_DB_ID];

pub fn card_templates() -> Value {
    json!([
        {
            "Name": "Basic",
            "Front": "<p class=\"sentence\">{{Sentence}}</p><ul class=\"ipa\">{{IPA}}</ul><div class=\"audio\">{{Audio}}</div>",
            "Back": "{{FrontSide}}<hr id=\"answer\"><p class=\"translation\">{{Translation}}</p><p class=\"note\">{{Note}}</p>",
        },
        {
            "Name": "Reverse",
            "Front": "<p class=\"translation\">{{Translation}}</p>",
            "Back": "{{FrontSide}}<hr id=\"answer\"><p class=\"sentence\">{{Sentence}}</p><ul class=\"ipa\">{{IPA}}</ul><p class=\"note\">{{Note}}</p><div class=\"audio\">{{Audio}}</div>",
        },
        {
            "Name": "Type",
            "Front": "<div class=\"input\">{{type:Sentence}}</div><p class=\"translation\">{{Translation}}</p><div class=\"audio\">{{Audio}}</div>",
            "Back": "{{FrontSide}}<hr id=\"answer\"><ul class=\"ipa\">{{IPA}}</ul><p class=\"note\">{{Note}}</p>",
        },
    ])
}

pub const CARD_CSS: &str = r#"
*,
*::before,
*::after {
	box-sizing: border-box;
}

* {
	margin: 0;
}

body {
	line-height: 1.5;
	-webkit-font-smoothing: antialiased;
}

img,
picture,
video,
canvas,
svg {
	display: block;
	max-width: 100%;
}

input,
button,
textarea,
select {
	font: inherit;
}

p,
h1,
h2,
h3,
h4,
h5,
h6 {
	overflow-wrap: break-word;
}

p {
	text-wrap: pretty;
}

h1,
h2,
h3,
h4,
h5,
h6 {
	text-wrap: balance;
}

html,
body {
	height: 100%;
}

.card {
	font-family: 'Roboto', sans-serif;
	font-size: 16px;
	padding: 30px 20px;
	margin: 0;
	text-align: start;
}

.replay-button svg {
	width: 30px;
	height: 30px;
}

.sentence {
	font-weight: 500;
	margin-bottom: 10px;
}

.ipa {
	list-style: none;
	display: flex;
	flex-wrap: wrap;
	gap: 10px;
	padding: 0;
	margin-bottom: 10px;
	margin-top: 10px;
}

.ipa li {
	border: 1px solid black;
	border-radius: 10px;
	padding: 5px;
	font-size: 14px;
}

body.nightMode .ipa li {
	border: 1px solid lightgrey;
}

.ipa:empty {
	display: none;
}

.audio {
	position: fixed;
	left: 20px;
	bottom: 20px;
	filter: drop-shadow(0px 4px 4px hsla(0, 0%, 0%, 0.3));
}

.translation {
	margin-bottom: 10px;
}

.note {
	white-space: pre-wrap;
	background-color: lightgrey;
	border-radius: 10px;
	padding: 8px;
}

body.nightMode .note {
	background-color: hsl(0, 0%, 12%);
}

.note:empty {
	display: none;
}

.input {
	margin-bottom: 10px;
}
"#;
