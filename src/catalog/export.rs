use crate::api::CatalogEntry;

pub const CSV_HEADER: &str =
    "norad_id,common_name,type,inclination_deg,apogee_km,perigee_km,period_minutes,rcs_m2,status";

/// Writes the given rows as CSV, header first. Column order follows
/// [`CatalogEntry`]'s field order.
pub fn to_csv<'a>(
    entries: impl IntoIterator<Item = &'a CatalogEntry>,
) -> Result<Vec<u8>, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut wrote_any = false;
    for entry in entries {
        writer.serialize(entry)?;
        wrote_any = true;
    }
    if !wrote_any {
        writer.write_record(CSV_HEADER.split(','))?;
    }
    writer.into_inner().map_err(|e| e.into_error().into())
}
