use std::path::Path;

use lofty::prelude::{AudioFile, ItemKey, TaggedFileExt};
use tracing::debug;
use walkdir::WalkDir;

use crate::config::LibrarySettings;

use super::model::Record;

fn is_audio_file(path: &Path, settings: &LibrarySettings) -> bool {
    let exts: Vec<String> = settings
        .extensions
        .iter()
        .map(|e| e.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|e| !e.is_empty())
        .collect();

    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            exts.iter().any(|e| e == &ext)
        })
        .unwrap_or(false)
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

/// Read the tags of `path` into a record. Unreadable files keep only the
/// file name as their title.
fn read_record(path: &Path, root: &Path) -> Record {
    let file = path
        .strip_prefix(root)
        .unwrap_or(path)
        .to_string_lossy()
        .into_owned();
    let mut record = Record::new(file);
    record.title = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string();

    match lofty::read_from_path(path) {
        Ok(tagged) => {
            record.time = Some(tagged.properties().duration().as_secs());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                let get = |key: &ItemKey| {
                    tag.get_string(key.clone())
                        .map(str::trim)
                        .filter(|v| !v.is_empty())
                        .map(str::to_string)
                };

                if let Some(v) = get(&ItemKey::TrackTitle) {
                    record.title = v;
                }
                record.artist = get(&ItemKey::TrackArtist).unwrap_or_default();
                record.album_artist = get(&ItemKey::AlbumArtist).unwrap_or_default();
                record.artist_sort = get(&ItemKey::TrackArtistSortOrder).unwrap_or_default();
                record.album_artist_sort =
                    get(&ItemKey::AlbumArtistSortOrder).unwrap_or_default();
                record.album = get(&ItemKey::AlbumTitle).unwrap_or_default();
                record.track = get(&ItemKey::TrackNumber).unwrap_or_default();
                record.disc = get(&ItemKey::DiscNumber).unwrap_or_default();
                record.date = get(&ItemKey::RecordingDate).unwrap_or_default();
                record.genre = get(&ItemKey::Genre).unwrap_or_default();
                record.composer = get(&ItemKey::Composer).unwrap_or_default();
                record.performer = get(&ItemKey::Performer).unwrap_or_default();
                record.comment = get(&ItemKey::Comment).unwrap_or_default();
            }
        }
        Err(e) => debug!(path = %path.display(), error = %e, "unreadable tags"),
    }

    record.derive_fields();
    record
}

/// Walk `dir` and build one record per audio file, ordered by file path.
pub fn scan(dir: &Path, settings: &LibrarySettings) -> Vec<Record> {
    let mut records: Vec<Record> = Vec::new();

    let mut walker = WalkDir::new(dir).follow_links(settings.follow_links);

    // Non-recursive = only the root directory.
    let depth_cap = if settings.recursive {
        settings.max_depth
    } else {
        Some(1)
    };
    if let Some(d) = depth_cap {
        walker = walker.max_depth(d);
    }

    for entry in walker
        .into_iter()
        .filter_entry(|e| settings.include_hidden || e.depth() == 0 || !is_hidden(e.path()))
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if path.is_file()
            && (settings.include_hidden || !is_hidden(path))
            && is_audio_file(path, settings)
        {
            records.push(read_record(path, dir));
        }
    }

    records.sort_by(|a, b| a.file.cmp(&b.file));
    debug!(dir = %dir.display(), count = records.len(), "library scan finished");
    records
}
