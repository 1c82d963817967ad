//! # Catalog Models
//!
//! Records mirrored from the catalog REST API. Field names follow the wire
//! format (camelCase on the wire, snake_case here), so every struct can be
//! decoded straight from an upstream response and re-encoded unchanged.
//!
//! ## Envelopes
//! - [`Listing`]: one page of a collection plus pagination counters
//! - [`Item`]: a single record
//! - [`Ack`]: delete/unlink acknowledgement
//!
//! ## Join Records
//! [`LexiconAsset`], [`LexiconReference`] and [`SubcultureAsset`] have no
//! identity beyond their `(parent, child)` pair. The parent's display name is
//! filled in locally during aggregation.
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::warn;

use crate::pagination::PageWindow;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PublicationStatus {
    Published,
    Draft,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConservationStatus {
    Maintained,
    Endangered,
    Critical,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReferenceType {
    Jurnal,
    Buku,
    Artikel,
    Website,
    Laporan,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetType {
    #[serde(rename = "FOTO")]
    Foto,
    #[serde(rename = "AUDIO")]
    Audio,
    #[serde(rename = "VIDEO")]
    Video,
    #[serde(rename = "MODEL_3D")]
    Model3d,
}

impl AssetType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetType::Foto => "FOTO",
            AssetType::Audio => "AUDIO",
            AssetType::Video => "VIDEO",
            AssetType::Model3d => "MODEL_3D",
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AssetStatus {
    Active,
    Processing,
    Archived,
    Corrupted,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Leksikon {
    pub leksikon_id: u64,
    pub kata_leksikon: String,
    pub ipa: String,
    pub transliterasi: String,
    pub makna_etimologi: String,
    pub makna_kultural: String,
    pub common_meaning: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub varian: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_varians: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deskripsi_lain: Option<String>,
    pub domain_kodifikasi_id: u64,
    pub status_preservasi: ConservationStatus,
    pub contributor_id: u64,
    pub status: PublicationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LeksikonInput {
    pub kata_leksikon: String,
    pub ipa: String,
    pub transliterasi: String,
    pub makna_etimologi: String,
    pub makna_kultural: String,
    pub common_meaning: String,
    pub translation: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub varian: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translation_varians: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deskripsi_lain: Option<String>,
    pub domain_kodifikasi_id: u64,
    pub status_preservasi: ConservationStatus,
    pub contributor_id: u64,
    pub status: PublicationStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Subculture {
    pub subculture_id: u64,
    pub nama_subculture: String,
    pub penjelasan: String,
    pub culture_id: u64,
    pub status: PublicationStatus,
    pub status_konservasi: ConservationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubcultureInput {
    pub nama_subculture: String,
    pub penjelasan: String,
    pub culture_id: u64,
    pub status: PublicationStatus,
    pub status_konservasi: ConservationStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Culture {
    pub culture_id: u64,
    pub nama_budaya: String,
    pub pulau_asal: String,
    pub provinsi: String,
    pub kota_daerah: String,
    pub klasifikasi: String,
    pub karakteristik: String,
    pub status_konservasi: ConservationStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub status: PublicationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CultureInput {
    pub nama_budaya: String,
    pub pulau_asal: String,
    pub provinsi: String,
    pub kota_daerah: String,
    pub klasifikasi: String,
    pub karakteristik: String,
    pub status_konservasi: ConservationStatus,
    pub latitude: f64,
    pub longitude: f64,
    pub status: PublicationStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Contributor {
    pub contributor_id: u64,
    pub nama_contributor: String,
    pub institusi: String,
    pub email: String,
    pub expertise_area: String,
    pub contact_info: String,
    #[serde(default)]
    pub registered_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ContributorInput {
    pub nama_contributor: String,
    pub institusi: String,
    pub email: String,
    pub expertise_area: String,
    pub contact_info: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub referensi_id: u64,
    pub judul: String,
    pub tipe_referensi: ReferenceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penjelasan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penulis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tahun_terbit: Option<String>,
    pub status: PublicationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReferenceInput {
    pub judul: String,
    pub tipe_referensi: ReferenceType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penjelasan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penulis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tahun_terbit: Option<String>,
    pub status: PublicationStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub asset_id: u64,
    pub nama_file: String,
    pub tipe: AssetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penjelasan: Option<String>,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_json: Option<String>,
    pub status: AssetStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssetInput {
    pub nama_file: String,
    pub tipe: AssetType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub penjelasan: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_size: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash_checksum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AssetStatus>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainKodifikasi {
    pub domain_kodifikasi_id: u64,
    pub kode: String,
    pub nama_domain: String,
    pub penjelasan: String,
    pub subculture_id: u64,
    pub status: PublicationStatus,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DomainKodifikasiInput {
    pub kode: String,
    pub nama_domain: String,
    pub penjelasan: String,
    pub subculture_id: u64,
    pub status: PublicationStatus,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LexiconAsset {
    #[serde(default)]
    pub leksikon_id: u64,
    pub asset_id: u64,
    #[serde(default)]
    pub asset_role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kata_leksikon: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LexiconReference {
    #[serde(default)]
    pub leksikon_id: u64,
    pub referensi_id: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub citation_note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referensi: Option<Reference>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kata_leksikon: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubcultureAsset {
    #[serde(default)]
    pub subculture_id: u64,
    pub asset_id: u64,
    #[serde(default)]
    pub asset_role: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub asset: Option<Asset>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nama_subculture: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Listing<T> {
    pub success: bool,
    #[serde(default)]
    pub message: String,
    pub data: Vec<T>,
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(skip)]
    pub(crate) fallback: bool,
}

impl<T> Listing<T> {
    /// True when this page was served from the embedded fixtures.
    pub fn uses_mock_data(&self) -> bool {
        self.fallback
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Item<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    #[serde(skip)]
    pub(crate) fallback: bool,
}

impl<T> Item<T> {
    pub fn uses_mock_data(&self) -> bool {
        self.fallback
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    #[serde(default = "succeeded")]
    pub success: bool,
    #[serde(default)]
    pub message: String,
}

fn succeeded() -> bool {
    true
}

fn text(body: &Value, key: &str) -> Option<String> {
    body.get(key).and_then(Value::as_str).map(str::to_string)
}

fn counter(body: &Value, key: &str) -> Option<u64> {
    body.get(key).and_then(Value::as_u64)
}

/// Elements of a bare array or of the `data` array of an envelope.
pub(crate) fn rows(body: &Value) -> &[Value] {
    match body {
        Value::Array(items) => items,
        _ => body
            .get("data")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default(),
    }
}

/// Decodes each row on its own. Rows that do not fit `T` are logged and left out.
pub(crate) fn decode_rows<T: DeserializeOwned>(rows: &[Value], path: &str) -> Vec<T> {
    rows.iter()
        .enumerate()
        .filter_map(|(index, row)| match T::deserialize(row) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!("Dropping row {index} from {path}: {e}");
                None
            }
        })
        .collect()
}

impl<T: DeserializeOwned> Listing<T> {
    /// Reads whatever envelope the API sent. Missing counters are derived from
    /// the request and the rows that decoded.
    pub(crate) fn from_body(body: &Value, page: u32, limit: u32, path: &str) -> Self {
        let data: Vec<T> = decode_rows(rows(body), path);

        let page = counter(body, "page")
            .and_then(|page| u32::try_from(page).ok())
            .unwrap_or(page);
        let limit = counter(body, "limit")
            .and_then(|limit| u32::try_from(limit).ok())
            .unwrap_or(limit);
        let total = counter(body, "total").unwrap_or(data.len() as u64);
        let total_pages = counter(body, "totalPages")
            .and_then(|pages| u32::try_from(pages).ok())
            .unwrap_or_else(|| PageWindow::new(page, limit, total).total_pages());

        Self {
            success: body.get("success").and_then(Value::as_bool).unwrap_or(true),
            message: text(body, "message").unwrap_or_default(),
            data,
            total,
            page,
            limit,
            total_pages,
            fallback: false,
        }
    }
}

impl<T: DeserializeOwned> Item<T> {
    /// The record sits under `data`, or is the body itself when unwrapped.
    pub(crate) fn from_body(body: &Value) -> serde_json::Result<Self> {
        let data = T::deserialize(body.get("data").unwrap_or(body))?;

        Ok(Self {
            success: body.get("success").and_then(Value::as_bool).unwrap_or(true),
            message: text(body, "message").unwrap_or_default(),
            data,
            fallback: false,
        })
    }
}

impl Ack {
    /// A 2xx answer is a success unless the body says otherwise.
    pub(crate) fn from_body(body: &[u8], done: String) -> Self {
        let body: Value = serde_json::from_slice(body).unwrap_or(Value::Null);

        Self {
            success: body.get("success").and_then(Value::as_bool).unwrap_or(true),
            message: text(&body, "message").unwrap_or(done),
        }
    }
}

/// Collections come back either bare or wrapped in a `data` field.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
pub(crate) enum Payload<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    },
}

impl<T> Payload<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            Payload::Bare(items) => items,
            Payload::Wrapped { data } => data,
        }
    }
}
