use serde::{Serialize, de::DeserializeOwned};

use crate::{
    fixtures,
    models::{
        Asset, AssetInput, Contributor, ContributorInput, Culture, CultureInput, DomainKodifikasi,
        DomainKodifikasiInput, Leksikon, LeksikonInput, Reference, ReferenceInput, Subculture,
        SubcultureInput,
    },
};

/// Fields matched by the client-side filter box.
pub trait Searchable {
    fn haystack(&self) -> Vec<&str>;
}

/// A top-level collection exposed by the catalog API.
pub trait Resource:
    Serialize + DeserializeOwned + Searchable + Clone + Send + Sync + 'static
{
    type Input: Serialize + DeserializeOwned + Send + Sync + 'static;

    /// Collection segment under the API base, e.g. `leksikons`.
    const PATH: &'static str;

    /// Singular name used in log lines.
    const LABEL: &'static str;

    fn id(&self) -> u64;

    fn display_name(&self) -> &str;

    /// Canned records served when the API is unreachable.
    fn fixtures() -> Vec<Self>;
}

impl Searchable for Leksikon {
    fn haystack(&self) -> Vec<&str> {
        vec![self.kata_leksikon.as_str()]
    }
}

impl Resource for Leksikon {
    type Input = LeksikonInput;
    const PATH: &'static str = "leksikons";
    const LABEL: &'static str = "leksikon";

    fn id(&self) -> u64 {
        self.leksikon_id
    }

    fn display_name(&self) -> &str {
        &self.kata_leksikon
    }

    fn fixtures() -> Vec<Self> {
        fixtures::leksikons()
    }
}

impl Searchable for Subculture {
    fn haystack(&self) -> Vec<&str> {
        vec![self.nama_subculture.as_str(), self.penjelasan.as_str()]
    }
}

impl Resource for Subculture {
    type Input = SubcultureInput;
    const PATH: &'static str = "subcultures";
    const LABEL: &'static str = "subculture";

    fn id(&self) -> u64 {
        self.subculture_id
    }

    fn display_name(&self) -> &str {
        &self.nama_subculture
    }

    fn fixtures() -> Vec<Self> {
        fixtures::subcultures()
    }
}

impl Searchable for Culture {
    fn haystack(&self) -> Vec<&str> {
        vec![
            self.nama_budaya.as_str(),
            self.provinsi.as_str(),
            self.kota_daerah.as_str(),
            self.klasifikasi.as_str(),
        ]
    }
}

impl Resource for Culture {
    type Input = CultureInput;
    const PATH: &'static str = "cultures";
    const LABEL: &'static str = "culture";

    fn id(&self) -> u64 {
        self.culture_id
    }

    fn display_name(&self) -> &str {
        &self.nama_budaya
    }

    fn fixtures() -> Vec<Self> {
        fixtures::cultures()
    }
}

impl Searchable for Contributor {
    fn haystack(&self) -> Vec<&str> {
        vec![
            self.nama_contributor.as_str(),
            self.institusi.as_str(),
            self.email.as_str(),
            self.expertise_area.as_str(),
        ]
    }
}

impl Resource for Contributor {
    type Input = ContributorInput;
    const PATH: &'static str = "contributors";
    const LABEL: &'static str = "contributor";

    fn id(&self) -> u64 {
        self.contributor_id
    }

    fn display_name(&self) -> &str {
        &self.nama_contributor
    }

    fn fixtures() -> Vec<Self> {
        fixtures::contributors()
    }
}

impl Searchable for Reference {
    fn haystack(&self) -> Vec<&str> {
        [
            Some(self.judul.as_str()),
            self.penulis.as_deref(),
            self.penjelasan.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Resource for Reference {
    type Input = ReferenceInput;
    const PATH: &'static str = "referensi";
    const LABEL: &'static str = "reference";

    fn id(&self) -> u64 {
        self.referensi_id
    }

    fn display_name(&self) -> &str {
        &self.judul
    }

    fn fixtures() -> Vec<Self> {
        fixtures::references()
    }
}

impl Searchable for Asset {
    fn haystack(&self) -> Vec<&str> {
        [
            Some(self.nama_file.as_str()),
            self.penjelasan.as_deref(),
            Some(self.tipe.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl Resource for Asset {
    type Input = AssetInput;
    const PATH: &'static str = "assets";
    const LABEL: &'static str = "asset";

    fn id(&self) -> u64 {
        self.asset_id
    }

    fn display_name(&self) -> &str {
        &self.nama_file
    }

    fn fixtures() -> Vec<Self> {
        fixtures::assets()
    }
}

impl Searchable for DomainKodifikasi {
    fn haystack(&self) -> Vec<&str> {
        vec![self.kode.as_str(), self.nama_domain.as_str(), self.penjelasan.as_str()]
    }
}

impl Resource for DomainKodifikasi {
    type Input = DomainKodifikasiInput;
    const PATH: &'static str = "domain-kodifikasi";
    const LABEL: &'static str = "domain kodifikasi";

    fn id(&self) -> u64 {
        self.domain_kodifikasi_id
    }

    fn display_name(&self) -> &str {
        &self.nama_domain
    }

    fn fixtures() -> Vec<Self> {
        fixtures::domains()
    }
}
