use std::collections::{
    HashMap,
    HashSet,
};

use crate::{
    anki::{
        template,
        types::{
            FieldUpdate,
            MediaDirective,
            NewNote,
            NoteFields,
            RemoteNote,
        },
    },
    core::{
        utils::{
            blob_name_from_url,
            ipa_field_value,
        },
        VocabEntry,
    },
};

/// Only fetched audio whose resolved filename carries this extension is
/// attached; anything else leaves the Audio field empty.
pub const AUDIO_EXTENSION: &str = ".mp3";

/// The three disjoint action sets produced by reconciliation. Together they
/// cover every input entry and every tracked remote note exactly once.
#[derive(Debug, Default)]
pub struct SyncPlan {
    pub to_add: Vec<NewNote>,
    pub to_update: Vec<FieldUpdate>,
    pub to_delete: Vec<u64>,
}

impl SyncPlan {
    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

/// Three-way diff of the export against the remote snapshot, joined on the
/// external id stored in each note's dbID field.
///
/// Remote notes without a dbID value are untracked and left alone. Sentence
/// and dbID are treated as immutable once created: only Translation, Note,
/// and IPA participate in the update diff. Add/Update follow input order,
/// Delete follows snapshot order.
pub fn reconcile(entries: &[VocabEntry], remote: &[RemoteNote]) -> SyncPlan {
    let mut by_db_id: HashMap<&str, &RemoteNote> = HashMap::new();
    for note in remote {
        if let Some(db_id) = note.db_id() {
            by_db_id.insert(db_id, note);
        }
    }

    let mut plan = SyncPlan::default();

    for entry in entries {
        let ipa_value = ipa_field_value(&entry.pieces);
        let note_text = entry.note.clone().unwrap_or_default();

        match by_db_id.get(entry.id.as_str()) {
            None => plan.to_add.push(new_note(entry, note_text, ipa_value)),
            Some(note) => {
                let mut fields = HashMap::new();
                if note.field_value(template::FIELD_TRANSLATION).unwrap_or_default()
                    != entry.translation
                {
                    fields
                        .insert(template::FIELD_TRANSLATION.to_string(), entry.translation.clone());
                }
                if note.field_value(template::FIELD_NOTE).unwrap_or_default() != note_text {
                    fields.insert(template::FIELD_NOTE.to_string(), note_text);
                }
                if note.field_value(template::FIELD_IPA).unwrap_or_default() != ipa_value {
                    fields.insert(template::FIELD_IPA.to_string(), ipa_value);
                }

                if !fields.is_empty() {
                    plan.to_update.push(FieldUpdate { id: note.note_id, fields });
                }
            }
        }
    }

    let known_ids: HashSet<&str> = entries.iter().map(|entry| entry.id.as_str()).collect();
    for note in remote {
        if let Some(db_id) = note.db_id() {
            if !known_ids.contains(db_id) {
                plan.to_delete.push(note.note_id);
            }
        }
    }

    plan
}

fn new_note(entry: &VocabEntry, note_text: String, ipa_value: String) -> NewNote {
    let audio = blob_name_from_url(&entry.audio_url)
        .filter(|name| name.ends_with(AUDIO_EXTENSION))
        .map(|name| {
            vec![MediaDirective {
                url: entry.audio_url.clone(),
                filename: name.to_string(),
                fields: vec![template::FIELD_AUDIO.to_string()],
            }]
        });

    NewNote {
        deck_name: template::DECK_NAME.to_string(),
        model_name: template::MODEL_NAME.to_string(),
        fields: NoteFields {
            sentence: entry.sentence.clone(),
            translation: entry.translation.clone(),
            note: note_text,
            db_id: entry.id.clone(),
            ipa: ipa_value,
            audio: String::new(),
        },
        audio,
    }
}
