//! Distribution assignment

use crate::{
    config::PublisherConfig,
    models::{
        record::{ExtraFields, OnlineResource, Party, TransferOption},
        Contact, Distribution,
    },
};

use super::RecordSet;

impl From<&crate::config::ResourceConfig> for OnlineResource {
    fn from(resource: &crate::config::ResourceConfig) -> Self {
        Self {
            href: resource.href.clone(),
            title: Some(resource.title.clone()),
            description: Some(resource.description.clone()),
            function: Some(resource.function.clone()),
            extra: ExtraFields::new(),
        }
    }
}

/// Distribution entry naming the publisher as distributor, with a link to ordering information
pub fn publisher_distribution(publisher: &PublisherConfig) -> Distribution {
    let mut organisation = ExtraFields::new();
    organisation.insert("href".to_string(), publisher.href.clone().into());
    organisation.insert("title".to_string(), publisher.href_title.clone().into());

    let address = &publisher.address;
    let mut contact_extra = ExtraFields::new();
    contact_extra.insert("phone".to_string(), publisher.phone.clone().into());
    contact_extra.insert(
        "address".to_string(),
        serde_json::json!({
            "delivery_point": address.delivery_point,
            "city": address.city,
            "administrative_area": address.administrative_area,
            "postal_code": address.postal_code,
            "country": address.country,
        }),
    );
    contact_extra.insert(
        "online_resource".to_string(),
        serde_json::json!({
            "href": publisher.website.href,
            "title": publisher.website.title,
            "description": publisher.website.description,
            "function": publisher.website.function,
        }),
    );

    Distribution {
        distributor: Some(Contact {
            individual: None,
            organisation: Some(Party {
                name: publisher.name.clone(),
                extra: organisation,
            }),
            email: Some(publisher.email.clone()),
            role: vec!["distributor".to_string()],
            extra: contact_extra,
        }),
        transfer_option: Some(TransferOption {
            online_resource: Some(OnlineResource::from(&publisher.ordering)),
            extra: ExtraFields::new(),
        }),
        extra: ExtraFields::new(),
    }
}

/// Replace every record's distribution with the publisher entry
pub fn apply(mut set: RecordSet, publisher: &PublisherConfig) -> RecordSet {
    let distribution = publisher_distribution(publisher);
    for (_, record) in set.records_mut() {
        record.distribution = vec![distribution.clone()];
    }
    set
}
