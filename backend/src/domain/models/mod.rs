pub mod offer_record;

pub use offer_record::OfferRecord;
