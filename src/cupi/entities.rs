//! Descriptor table for the Unity Connection object types the client knows about.
//!
//! Field lists cover what the server returns for a default GET. Anything the server adds later
//! still loads; it just shows up as a diagnostic until it is listed here.

use crate::cupi::entitydescriptor::{EntityDescriptor, EnumDescriptor, FieldDescriptor as F};

pub static CLOCK_MODE: EnumDescriptor = EnumDescriptor {
    name: "ClockMode",
    variants: &[(0, "SystemDefaultClock"), (1, "HourAndMinuteOnly"), (2, "TwentyFourHour")],
};

pub static SEND_URGENT_MSG: EnumDescriptor = EnumDescriptor {
    name: "SendUrgentMsg",
    variants: &[(0, "Never"), (1, "Always"), (2, "Ask")],
};

pub static PLAY_AFTER_MESSAGE: EnumDescriptor = EnumDescriptor {
    name: "PlayAfterMessage",
    variants: &[(0, "NoRecording"), (1, "SystemDefaultRecording"), (2, "RecordedRecording")],
};

pub static NOTIFICATION_DEVICE_TYPE: EnumDescriptor = EnumDescriptor {
    name: "NotificationDeviceType",
    variants: &[(1, "Phone"), (2, "Pager"), (4, "Smtp"), (5, "Html"), (6, "Sip")],
};

pub static PHONE_SYSTEM_MWI_MODE: EnumDescriptor = EnumDescriptor {
    name: "MwiMode",
    variants: &[(0, "Off"), (1, "On"), (2, "ForceOffOnMessageDelete")],
};

pub static MEMBER_TYPE: EnumDescriptor = EnumDescriptor {
    name: "MemberType",
    variants: &[(1, "User"), (2, "DistributionList"), (4, "Contact")],
};

pub static USER: EntityDescriptor = EntityDescriptor {
    type_name: "User",
    resource_path: "users",
    list_key: "User",
    id_field: "ObjectId",
    lookup_field: Some("Alias"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("Alias"),
        F::string("FirstName"),
        F::string("LastName"),
        F::string("DisplayName"),
        F::string("Initials"),
        F::string("Title"),
        F::string("Department"),
        F::string("Building"),
        F::string("City"),
        F::string("State"),
        F::string("Country"),
        F::string("EmployeeId"),
        F::string("EmailAddress"),
        F::string("SmtpAddress").read_only(),
        F::string("DtmfAccessId"),
        F::int("TimeZone"),
        F::int("Language"),
        F::boolean("UseDefaultLanguage"),
        F::boolean("UseDefaultTimeZone"),
        F::enumeration("ClockMode", &CLOCK_MODE),
        F::boolean("ListInDirectory"),
        F::boolean("IsVmEnrolled"),
        F::boolean("IsTemplate").read_only(),
        F::boolean("Undeletable").read_only(),
        F::datetime("CreationTime").read_only(),
        F::string("CosObjectId"),
        F::string("CallHandlerObjectId").read_only(),
        F::string("PartitionObjectId"),
        F::string("LocationObjectId").read_only(),
        F::string("MediaSwitchObjectId"),
        F::string("PhoneSystemURI").read_only(),
        F::string("CosURI").read_only(),
        F::string("PartitionURI").read_only(),
    ],
};

pub static USER_TEMPLATE: EntityDescriptor = EntityDescriptor {
    type_name: "UserTemplate",
    resource_path: "usertemplates",
    list_key: "UserTemplate",
    id_field: "ObjectId",
    lookup_field: Some("Alias"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("Alias"),
        F::string("DisplayName"),
        F::int("TimeZone"),
        F::int("Language"),
        F::enumeration("ClockMode", &CLOCK_MODE),
        F::boolean("ListInDirectory"),
        F::boolean("IsTemplate").read_only(),
        F::boolean("Undeletable").read_only(),
        F::datetime("CreationTime").read_only(),
        F::string("CosObjectId"),
        F::string("PartitionObjectId"),
        F::string("MediaSwitchObjectId"),
        F::string("CallHandlerObjectId").read_only(),
    ],
};

pub static CALL_HANDLER: EntityDescriptor = EntityDescriptor {
    type_name: "Callhandler",
    resource_path: "handlers/callhandlers",
    list_key: "Callhandler",
    id_field: "ObjectId",
    lookup_field: Some("DisplayName"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("DisplayName"),
        F::string("DtmfAccessId"),
        F::boolean("IsPrimary").read_only(),
        F::boolean("IsTemplate").read_only(),
        F::boolean("Undeletable").read_only(),
        F::datetime("CreationTime").read_only(),
        F::int("TimeZone"),
        F::int("Language"),
        F::boolean("UseDefaultLanguage"),
        F::boolean("UseDefaultTimeZone"),
        F::int("MaxMsgLen"),
        F::int("OneKeyDelay"),
        F::boolean("EditMsg"),
        F::boolean("IsForwardingEnabled"),
        F::enumeration("SendUrgentMsg", &SEND_URGENT_MSG),
        F::enumeration("PlayAfterMessage", &PLAY_AFTER_MESSAGE),
        F::string("ScheduleSetObjectId"),
        F::string("RecipientDistributionListObjectId"),
        F::string("RecipientSubscriberObjectId"),
        F::string("PartitionObjectId"),
        F::string("LocationObjectId").read_only(),
        F::string("MediaSwitchObjectId"),
    ],
};

pub static CALL_HANDLER_TEMPLATE: EntityDescriptor = EntityDescriptor {
    type_name: "CallhandlerTemplate",
    resource_path: "callhandlertemplates",
    list_key: "CallhandlerTemplate",
    id_field: "ObjectId",
    lookup_field: Some("DisplayName"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("DisplayName"),
        F::int("TimeZone"),
        F::int("Language"),
        F::int("MaxMsgLen"),
        F::enumeration("SendUrgentMsg", &SEND_URGENT_MSG),
        F::string("ScheduleSetObjectId"),
        F::string("RecipientDistributionListObjectId"),
        F::string("RecipientSubscriberObjectId"),
        F::string("PartitionObjectId"),
        F::string("MediaSwitchObjectId"),
        F::boolean("Undeletable").read_only(),
    ],
};

pub static DISTRIBUTION_LIST: EntityDescriptor = EntityDescriptor {
    type_name: "DistributionList",
    resource_path: "distributionlists",
    list_key: "DistributionList",
    id_field: "ObjectId",
    lookup_field: Some("Alias"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("Alias"),
        F::string("DisplayName"),
        F::string("DtmfAccessId"),
        F::boolean("AllowContacts"),
        F::boolean("AllowForeignMessage"),
        F::boolean("IsPublic"),
        F::boolean("Undeletable").read_only(),
        F::datetime("CreationTime").read_only(),
        F::string("PartitionObjectId"),
        F::string("LocationObjectId").read_only(),
        F::string("SmtpAddress").read_only(),
        F::string("DistributionListMembersURI").read_only(),
    ],
};

pub static DISTRIBUTION_LIST_MEMBER: EntityDescriptor = EntityDescriptor {
    type_name: "DistributionListMember",
    resource_path: "distributionlists/{parent}/distributionlistmembers",
    list_key: "DistributionListMember",
    id_field: "ObjectId",
    lookup_field: Some("Alias"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("DistributionListObjectId").read_only(),
        F::string("Alias").read_only(),
        F::string("DisplayName").read_only(),
        F::enumeration("MemberType", &MEMBER_TYPE).read_only(),
        F::string("MemberUserObjectId"),
        F::string("MemberDistributionListObjectId"),
        F::string("MemberContactObjectId"),
    ],
};

pub static CONTACT: EntityDescriptor = EntityDescriptor {
    type_name: "Contact",
    resource_path: "contacts",
    list_key: "Contact",
    id_field: "ObjectId",
    lookup_field: Some("Alias"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("Alias"),
        F::string("FirstName"),
        F::string("LastName"),
        F::string("DisplayName"),
        F::string("AltFirstName"),
        F::string("AltLastName"),
        F::string("DtmfAccessId"),
        F::boolean("ListInDirectory"),
        F::boolean("TransferEnabled"),
        F::string("TransferExtension"),
        F::string("PartitionObjectId"),
        F::string("LocationObjectId").read_only(),
        F::datetime("CreationTime").read_only(),
    ],
};

pub static SCHEDULE: EntityDescriptor = EntityDescriptor {
    type_name: "Schedule",
    resource_path: "schedules",
    list_key: "Schedule",
    id_field: "ObjectId",
    lookup_field: Some("DisplayName"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("DisplayName"),
        F::boolean("IsHoliday"),
        F::boolean("Undeletable").read_only(),
        F::datetime("StartDate"),
        F::datetime("EndDate"),
        F::string("OwnerLocationObjectId"),
        F::string("OwnerSubscriberObjectId"),
        F::string("OwnerPersonalRuleSetObjectId"),
        F::string("ScheduleDetailsURI").read_only(),
    ],
};

pub static SCHEDULE_SET: EntityDescriptor = EntityDescriptor {
    type_name: "ScheduleSet",
    resource_path: "schedulesets",
    list_key: "ScheduleSet",
    id_field: "ObjectId",
    lookup_field: Some("DisplayName"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("DisplayName"),
        F::boolean("Undeletable").read_only(),
        F::string("OwnerLocationObjectId"),
        F::string("OwnerSubscriberObjectId"),
        F::string("ScheduleSetMembersURI").read_only(),
    ],
};

pub static NOTIFICATION_DEVICE: EntityDescriptor = EntityDescriptor {
    type_name: "NotificationDevice",
    resource_path: "users/{parent}/notificationdevices",
    list_key: "NotificationDevice",
    id_field: "ObjectId",
    lookup_field: Some("DisplayName"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("SubscriberObjectId").read_only(),
        F::string("DisplayName"),
        F::string("DeviceName"),
        F::enumeration("Type", &NOTIFICATION_DEVICE_TYPE),
        F::boolean("Active"),
        F::boolean("Undeletable").read_only(),
        F::string("PhoneNumber"),
        F::string("SmtpAddress"),
        F::string("MediaSwitchObjectId"),
        F::string("ScheduleSetObjectId"),
        F::int("RetriesOnBusy"),
        F::int("RetriesOnRna"),
        F::int("BusyRetryInterval"),
        F::int("RnaRetryInterval"),
        F::boolean("SendCallerId"),
        F::boolean("SendCount"),
    ],
};

pub static PARTITION: EntityDescriptor = EntityDescriptor {
    type_name: "Partition",
    resource_path: "partitions",
    list_key: "Partition",
    id_field: "ObjectId",
    lookup_field: Some("Name"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("Name"),
        F::string("Description"),
        F::string("LocationObjectId").read_only(),
    ],
};

pub static SEARCH_SPACE: EntityDescriptor = EntityDescriptor {
    type_name: "SearchSpace",
    resource_path: "searchspaces",
    list_key: "SearchSpace",
    id_field: "ObjectId",
    lookup_field: Some("Name"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("Name"),
        F::string("Description"),
        F::string("LocationObjectId").read_only(),
        F::string("SearchSpaceMembersURI").read_only(),
    ],
};

pub static COS: EntityDescriptor = EntityDescriptor {
    type_name: "Cos",
    resource_path: "coses",
    list_key: "Cos",
    id_field: "ObjectId",
    lookup_field: Some("DisplayName"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("DisplayName"),
        F::int("MaxMsgLength"),
        F::int("MaxGreetingLength"),
        F::int("MaxNameLength"),
        F::boolean("CanRecordName"),
        F::boolean("ListInDirectoryStatus"),
        F::boolean("AccessUnifiedClient"),
        F::boolean("MovetoDeleteFolder"),
        F::boolean("Undeletable").read_only(),
        F::string("LocationObjectId").read_only(),
    ],
};

pub static PHONE_SYSTEM: EntityDescriptor = EntityDescriptor {
    type_name: "PhoneSystem",
    resource_path: "phonesystems",
    list_key: "PhoneSystem",
    id_field: "ObjectId",
    lookup_field: Some("DisplayName"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("DisplayName"),
        F::boolean("DefaultTrapSwitch"),
        F::boolean("MwiAlwaysUpdate"),
        F::enumeration("MwiForceOff", &PHONE_SYSTEM_MWI_MODE),
        F::boolean("RestrictDialUnconditional"),
        F::boolean("EnablePhoneApplications"),
        F::int("CallLoopSupervisedTransferDetect"),
        F::string("LocationObjectId").read_only(),
    ],
};

pub static LOCATION: EntityDescriptor = EntityDescriptor {
    type_name: "ConnectionLocation",
    resource_path: "locations/connectionlocations",
    list_key: "ConnectionLocation",
    id_field: "ObjectId",
    lookup_field: Some("DisplayName"),
    fields: &[
        F::string("URI").read_only(),
        F::string("ObjectId").read_only(),
        F::string("DisplayName"),
        F::string("HostAddress").read_only(),
        F::string("SmtpDomain").read_only(),
        F::string("DtmfAccessId"),
        F::boolean("IsPrimary").read_only(),
        F::int("DefaultLanguage"),
        F::string("DefaultPartitionObjectId"),
        F::string("DefaultSearchSpaceObjectId"),
    ],
};

/// Every descriptor in the table.
pub static ALL: &[&EntityDescriptor] = &[
    &USER,
    &USER_TEMPLATE,
    &CALL_HANDLER,
    &CALL_HANDLER_TEMPLATE,
    &DISTRIBUTION_LIST,
    &DISTRIBUTION_LIST_MEMBER,
    &CONTACT,
    &SCHEDULE,
    &SCHEDULE_SET,
    &NOTIFICATION_DEVICE,
    &PARTITION,
    &SEARCH_SPACE,
    &COS,
    &PHONE_SYSTEM,
    &LOCATION,
];

/// Descriptor by type name, e.g. `Callhandler`.
pub fn by_type_name(type_name: &str) -> Option<&'static EntityDescriptor> {
    ALL.iter()
        .copied()
        .find(|descriptor| descriptor.type_name.eq_ignore_ascii_case(type_name))
}
