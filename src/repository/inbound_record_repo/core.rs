use super::{InboundRecordRepository, NotesUpdate, UpsertOutcome};
use crate::domain::InboundRecord;
use crate::repository::error::RepositoryResult;

impl InboundRecordRepository {
    // ==========================================
    // 写入操作
    // ==========================================

    /// 按 (date, barcode) upsert
    ///
    /// # 返回
    /// - `Inserted`: 新键, 追加到末尾
    /// - `Replaced`: 同键记录被整条替换 (位置不变)
    pub fn upsert(&self, record: InboundRecord) -> RepositoryResult<UpsertOutcome> {
        let date = record.date.clone();
        let barcode = record.barcode.clone();

        let outcome = self.collection.update(move |items| {
            match items
                .iter()
                .position(|r| r.same_key(&record.date, &record.barcode))
            {
                Some(idx) => {
                    items[idx] = record;
                    Ok(UpsertOutcome::Replaced)
                }
                None => {
                    items.push(record);
                    Ok(UpsertOutcome::Inserted)
                }
            }
        })?;

        tracing::info!(date = %date, barcode = %barcode, ?outcome, "入库记录已写入");
        Ok(outcome)
    }

    /// 改写某日期全部记录的备注
    ///
    /// 整个过程持有集合锁, 与并发 upsert 互斥。
    /// 该日期无任何记录时, 写入 `carrier` 作为备注载体。
    pub fn apply_notes_for_date(
        &self,
        date: &str,
        notes: &str,
        carrier: impl FnOnce() -> InboundRecord,
    ) -> RepositoryResult<NotesUpdate> {
        let update = self.collection.update(|items| {
            let mut updated = 0;
            for record in items.iter_mut().filter(|r| r.date == date) {
                record.notes = Some(notes.to_string());
                updated += 1;
            }

            if updated > 0 {
                return Ok(NotesUpdate {
                    updated,
                    created_carrier: false,
                });
            }

            items.push(carrier());
            Ok(NotesUpdate {
                updated: 0,
                created_carrier: true,
            })
        })?;

        tracing::info!(
            date = %date,
            updated = update.updated,
            created_carrier = update.created_carrier,
            "日期备注已改写"
        );
        Ok(update)
    }
}
