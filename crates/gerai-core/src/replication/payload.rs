//! Sink wire format
//!
//! The sink appends one spreadsheet row per request, reading fields in this
//! order: date, nama, vendor, imageUrl, hargaKos, hargaJual, kuantitiStok,
//! notes. Absent prices are omitted rather than sent as zero.

use serde::Serialize;

use crate::format::format_sink_date;
use crate::models::InventoryRecord;

/// JSON body posted to the sink
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SinkPayload {
    /// `DD/MM/YYYY`
    pub date: String,
    #[serde(rename = "nama")]
    pub name: String,
    pub vendor: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    #[serde(rename = "hargaKos", skip_serializing_if = "Option::is_none")]
    pub cost_price: Option<f64>,
    #[serde(rename = "hargaJual", skip_serializing_if = "Option::is_none")]
    pub sell_price: Option<f64>,
    #[serde(rename = "kuantitiStok")]
    pub stock_quantity: u32,
    pub notes: String,
}

impl From<&InventoryRecord> for SinkPayload {
    fn from(record: &InventoryRecord) -> Self {
        Self {
            date: format_sink_date(record.date),
            name: record.name.clone(),
            vendor: record.vendor.clone(),
            image_url: record.image_url.clone().unwrap_or_default(),
            cost_price: record.cost_price,
            sell_price: record.sell_price,
            stock_quantity: record.stock_quantity,
            notes: record.notes.clone().unwrap_or_default(),
        }
    }
}
