//! Database text extraction

use std::io::{self, Write};

use rvtext::formats::database::schema::SYSTEM_FIELDS;
use rvtext::formats::{DatabasePath, DatabaseWriter, IndexedSet, ItemGroup};

use crate::baseline::DatabaseSnapshot;

/// Write every text-bearing database value as an override block.
///
/// Empty fields and learning notes are skipped. System fields are always
/// written, so translators see them even when the game leaves them blank.
/// Returns the number of blocks written.
pub(crate) fn extract_database<W: Write>(
    snapshot: &DatabaseSnapshot,
    writer: &mut DatabaseWriter<W>,
) -> io::Result<usize> {
    let mut written = 0;

    for group in ItemGroup::ALL {
        for item in snapshot.items(group) {
            for field in group.fields() {
                let value = item.field(field).unwrap_or_default();
                if value.is_empty() {
                    continue;
                }
                let path = DatabasePath::BaseItem {
                    group,
                    id: item.id,
                    field: field.to_string(),
                };
                writer.write_entry(&path, value)?;
                written += 1;
            }

            for (slot, learning) in item.learnings.iter().enumerate() {
                if learning.note.is_empty() {
                    continue;
                }
                let path = DatabasePath::ClassLearning {
                    class_id: item.id,
                    slot,
                };
                writer.write_entry(&path, &learning.note)?;
                written += 1;
            }
        }
    }

    for field in SYSTEM_FIELDS {
        let value = snapshot.system.get(field).map_or("", String::as_str);
        let path = DatabasePath::SystemField {
            field: field.to_string(),
        };
        writer.write_entry(&path, value)?;
        written += 1;
    }

    for set in IndexedSet::ALL {
        for (index, value) in snapshot.indexed(set).iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            writer.write_entry(&DatabasePath::IndexedSet { set, index }, value)?;
            written += 1;
        }
    }

    for (module, constants) in &snapshot.constants {
        for (name, value) in constants {
            let path = DatabasePath::ExternalConstant {
                module: module.clone(),
                name: name.clone(),
            };
            writer.write_entry(&path, value)?;
            written += 1;
        }
    }

    tracing::debug!("Extracted {} database blocks", written);
    Ok(written)
}
