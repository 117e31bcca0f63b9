use crate::client::{FrostClient, LookupError};
use crate::dataset::FrostDataset;
use crate::render::{self, OutputRegion};

/// In-memory variant: an immutable dataset handed over at construction,
/// looked up with a synchronous scan.
pub struct LocalLookup {
    dataset: FrostDataset,
    region: OutputRegion,
}

impl LocalLookup {
    pub fn new(dataset: FrostDataset) -> Self {
        Self {
            dataset,
            region: OutputRegion::new(),
        }
    }

    /// Widget over the dataset embedded in the binary
    pub fn builtin() -> Self {
        Self::new(FrostDataset::builtin().clone())
    }

    /// Resolve `zip` and replace the output region with the rendered record
    /// or a not-found message echoing the key
    pub fn lookup(&self, zip: &str) {
        let ticket = self.region.begin();
        let html = match self.dataset.lookup(zip) {
            Some(record) => render::frost_fragment(zip, record),
            None => render::frost_not_found(zip),
        };
        self.region.publish(ticket, html);
    }

    pub fn region(&self) -> &OutputRegion {
        &self.region
    }
}

/// Fetch variant: a fresh retrieval per lookup, rendered when it lands.
pub struct RemoteLookup {
    client: FrostClient,
    region: OutputRegion,
}

impl RemoteLookup {
    pub fn new(client: FrostClient) -> Self {
        Self {
            client,
            region: OutputRegion::new(),
        }
    }

    /// Resolve `zip` against a freshly fetched dataset and replace the
    /// output region with the rendered record, the fixed not-found string,
    /// or the fixed generic error string.
    ///
    /// The error is also returned so callers can log or inspect the cause;
    /// the rendered message never distinguishes it. A lookup superseded by a
    /// later call publishes nothing.
    pub async fn lookup(&self, zip: &str) -> Result<(), LookupError> {
        let ticket = self.region.begin();
        match self.client.lookup(zip).await {
            Ok(Some(record)) => {
                self.region.publish(ticket, render::place_fragment(&record));
                Ok(())
            }
            Ok(None) => {
                tracing::debug!("ZIP {} not in fetched dataset", zip);
                self.region.publish(ticket, render::NOT_FOUND_MESSAGE);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("Lookup for {} failed: {}", zip, err);
                self.region.publish(ticket, render::FETCH_ERROR_MESSAGE);
                Err(err)
            }
        }
    }

    pub fn region(&self) -> &OutputRegion {
        &self.region
    }
}
