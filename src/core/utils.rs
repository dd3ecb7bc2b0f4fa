use super::models::PhoneticPiece;

/// Wraps an IPA transcription in slash delimiters, leaving delimiters that
/// are already present in place. The suffix check runs after the prefix has
/// been applied, so a bare "" wraps to "/" rather than "//".
pub fn wrap_ipa_with_slashes(ipa: &str) -> String {
    let mut wrapped =
        if ipa.starts_with('/') { ipa.to_string() } else { format!("/{}", ipa) };
    if !wrapped.ends_with('/') {
        wrapped.push('/');
    }
    wrapped
}

/// Renders phonetic pieces into the IPA note field: one `<li>` per piece in
/// input order, concatenated with no separator. Inputs are trusted, nothing
/// is escaped.
pub fn ipa_field_value(pieces: &[PhoneticPiece]) -> String {
    pieces
        .iter()
        .map(|piece| format!("<li>{}: {}</li>", piece.word, wrap_ipa_with_slashes(&piece.ipa)))
        .collect()
}

/// Last non-empty path segment of a URL, used as the media filename. `None`
/// when the URL has no non-empty segment, in which case no audio is attached.
pub fn blob_name_from_url(url: &str) -> Option<&str> {
    url.split('/').filter(|segment| !segment.is_empty()).last()
}
