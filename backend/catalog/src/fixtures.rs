//! Canned records served when the catalog API cannot be reached.
use chrono::{DateTime, Duration, Utc};

use crate::models::{
    Asset, AssetStatus, AssetType, ConservationStatus, Contributor, Culture, DomainKodifikasi,
    Leksikon, PublicationStatus, Reference, ReferenceType, Subculture,
};

fn days_ago(days: i64) -> Option<DateTime<Utc>> {
    Some(Utc::now() - Duration::days(days))
}

pub fn leksikons() -> Vec<Leksikon> {
    vec![Leksikon {
        leksikon_id: 1,
        kata_leksikon: "Batik".to_string(),
        ipa: "[ba.tɪk]".to_string(),
        transliterasi: "batik".to_string(),
        makna_etimologi: "Dari bahasa Jawa kuno".to_string(),
        makna_kultural: "Seni tradisional Indonesia".to_string(),
        common_meaning: "Traditional textile art".to_string(),
        translation: "Batik".to_string(),
        varian: None,
        translation_varians: None,
        deskripsi_lain: None,
        domain_kodifikasi_id: 1,
        status_preservasi: ConservationStatus::Maintained,
        contributor_id: 1,
        status: PublicationStatus::Published,
        created_at: days_ago(0),
        updated_at: days_ago(0),
    }]
}

pub fn subcultures() -> Vec<Subculture> {
    vec![Subculture {
        subculture_id: 1,
        nama_subculture: "Batik Madura".to_string(),
        penjelasan: "Batik tradisional dari Madura dengan motif unik".to_string(),
        culture_id: 1,
        status: PublicationStatus::Published,
        status_konservasi: ConservationStatus::Maintained,
        created_at: days_ago(0),
        updated_at: days_ago(0),
    }]
}

pub fn cultures() -> Vec<Culture> {
    vec![
        Culture {
            culture_id: 1,
            nama_budaya: "Batik Jawa Timur".to_string(),
            pulau_asal: "Jawa".to_string(),
            provinsi: "Jawa Timur".to_string(),
            kota_daerah: "Surabaya".to_string(),
            klasifikasi: "Seni Tradisional".to_string(),
            karakteristik:
                "Batik dengan motif khas Jawa Timur yang mencerminkan kekayaan budaya lokal"
                    .to_string(),
            status_konservasi: ConservationStatus::Maintained,
            latitude: -7.2575,
            longitude: 112.7521,
            status: PublicationStatus::Published,
            created_at: days_ago(0),
            updated_at: days_ago(0),
        },
        Culture {
            culture_id: 2,
            nama_budaya: "Wayang Kulit".to_string(),
            pulau_asal: "Jawa".to_string(),
            provinsi: "Jawa Timur".to_string(),
            kota_daerah: "Malang".to_string(),
            klasifikasi: "Pertunjukan Tradisional".to_string(),
            karakteristik: "Seni pertunjukan bayangan dengan boneka kulit yang diterangi lampu"
                .to_string(),
            status_konservasi: ConservationStatus::Endangered,
            latitude: -7.9797,
            longitude: 112.6304,
            status: PublicationStatus::Published,
            created_at: days_ago(0),
            updated_at: days_ago(0),
        },
    ]
}

pub fn contributors() -> Vec<Contributor> {
    vec![Contributor {
        contributor_id: 1,
        nama_contributor: "Dr. Budi Santoso".to_string(),
        institusi: "Universitas Airlangga".to_string(),
        email: "budi@unair.ac.id".to_string(),
        expertise_area: "Budaya Jawa".to_string(),
        contact_info: "+62-31-1234567".to_string(),
        registered_at: days_ago(0),
    }]
}

fn reference(
    referensi_id: u64,
    judul: &str,
    tipe_referensi: ReferenceType,
    penjelasan: &str,
    slug: &str,
    penulis: &str,
    tahun_terbit: &str,
    status: PublicationStatus,
) -> Reference {
    Reference {
        referensi_id,
        judul: judul.to_string(),
        tipe_referensi,
        penjelasan: Some(penjelasan.to_string()),
        url: Some(format!("https://example.com/{slug}")),
        penulis: Some(penulis.to_string()),
        tahun_terbit: Some(tahun_terbit.to_string()),
        status,
        created_at: days_ago(0),
        updated_at: days_ago(0),
    }
}

pub fn references() -> Vec<Reference> {
    vec![
        reference(
            1,
            "Budaya Jawa Timur: Sejarah dan Perkembangan",
            ReferenceType::Buku,
            "Buku komprehensif tentang budaya Jawa Timur dari masa lalu hingga sekarang",
            "budaya-jawa-timur",
            "Prof. Soemanto",
            "2020",
            PublicationStatus::Published,
        ),
        reference(
            2,
            "Kajian Linguistik Budaya di Jawa Tengah",
            ReferenceType::Artikel,
            "Artikel penelitian tentang hubungan bahasa dan budaya lokal",
            "jurnal-bahasa-jawa",
            "Siti Aminah",
            "2023",
            PublicationStatus::Published,
        ),
        reference(
            3,
            "Tradisi Wayang Kulit di Era Modern",
            ReferenceType::Jurnal,
            "Jurnal penelitian tentang adaptasi seni wayang di zaman digital",
            "jurnal-wayang",
            "Dr. Bambang Sutrisno",
            "2022",
            PublicationStatus::Published,
        ),
        reference(
            4,
            "Batik Jawa: Motif dan Makna Simbolis",
            ReferenceType::Buku,
            "Panduan lengkap tentang jenis-jenis batik dan filosofinya",
            "batik-jawa",
            "Ibu Siti Nurhaliza",
            "2021",
            PublicationStatus::Published,
        ),
        reference(
            5,
            "Musik Tradisional Gamelan: Analisis Akustik",
            ReferenceType::Artikel,
            "Studi mendalam tentang karakteristik suara dan struktur musik gamelan",
            "gamelan-akustik",
            "Prof. Agus Supriyanto",
            "2023",
            PublicationStatus::Draft,
        ),
    ]
}

fn asset(
    asset_id: u64,
    nama_file: &str,
    tipe: AssetType,
    penjelasan: &str,
    url: &str,
    file_size: &str,
    status: AssetStatus,
    age_days: i64,
) -> Asset {
    Asset {
        asset_id,
        nama_file: nama_file.to_string(),
        tipe,
        penjelasan: Some(penjelasan.to_string()),
        url: url.to_string(),
        file_size: Some(file_size.to_string()),
        hash_checksum: None,
        metadata_json: None,
        status,
        created_at: days_ago(age_days),
        updated_at: days_ago(age_days),
    }
}

pub fn assets() -> Vec<Asset> {
    vec![
        asset(
            1,
            "batik-sample.jpg",
            AssetType::Foto,
            "Sampel batik Jawa Timur",
            "https://via.placeholder.com/300",
            "250KB",
            AssetStatus::Active,
            0,
        ),
        asset(
            2,
            "wayang-kulit-video.mp4",
            AssetType::Video,
            "Video pertunjukan wayang kulit tradisional",
            "https://www.youtube.com/watch?v=example",
            "150MB",
            AssetStatus::Active,
            1,
        ),
        asset(
            3,
            "gamelan-recording.mp3",
            AssetType::Audio,
            "Rekaman musik gamelan Jawa Timur",
            "https://example.com/gamelan.mp3",
            "8.5MB",
            AssetStatus::Active,
            2,
        ),
        asset(
            4,
            "candi-borobudur-3d.glb",
            AssetType::Model3d,
            "Model 3D Candi Borobudur",
            "https://sketchfab.com/models/example",
            "45MB",
            AssetStatus::Processing,
            3,
        ),
        asset(
            5,
            "tari-reog-ponorogo.jpg",
            AssetType::Foto,
            "Foto tari Reog Ponorogo",
            "https://via.placeholder.com/400",
            "320KB",
            AssetStatus::Active,
            4,
        ),
    ]
}

pub fn domains() -> Vec<DomainKodifikasi> {
    vec![DomainKodifikasi {
        domain_kodifikasi_id: 1,
        kode: "DK001".to_string(),
        nama_domain: "Seni Tradisional".to_string(),
        penjelasan: "Domain untuk seni tradisional Jawa Timur".to_string(),
        subculture_id: 1,
        status: PublicationStatus::Published,
        created_at: days_ago(0),
        updated_at: days_ago(0),
    }]
}
