//! Test data for veristat-core.

pub(crate) const TEST_STATUS_ENTRY: &str = r#"{
    "id": "https://example.com/credentials/status/3#94567",
    "type": "StatusList2021Entry",
    "statusPurpose": "revocation",
    "statusListIndex": "94567",
    "statusListCredential": "https://example.com/credentials/status/3"
}"#;

pub(crate) const TEST_CREDENTIAL_WITH_STATUS: &str = r#"{
    "@context": [
      "https://www.w3.org/2018/credentials/v1",
      "https://w3id.org/vc/status-list/2021/v1"
    ],
    "id": "https://example.com/credentials/23894672394",
    "type": ["VerifiableCredential"],
    "issuer": "did:example:12345",
    "issuanceDate": "2021-04-05T14:27:40Z",
    "credentialStatus": {
      "id": "https://example.com/credentials/status/3#94567",
      "type": "StatusList2021Entry",
      "statusPurpose": "revocation",
      "statusListIndex": "94567",
      "statusListCredential": "https://example.com/credentials/status/3"
    },
    "credentialSubject": {
      "id": "did:example:6789",
      "type": "Person"
    }
}"#;

pub(crate) const TEST_CREDENTIAL_WITH_STATUS_ARRAY: &str = r#"{
    "@context": [
      "https://www.w3.org/2018/credentials/v1",
      "https://w3id.org/vc/status-list/2021/v1"
    ],
    "id": "https://example.com/credentials/23894672394",
    "type": ["VerifiableCredential"],
    "issuer": "did:example:12345",
    "issuanceDate": "2021-04-05T14:27:40Z",
    "credentialStatus": [
      {
        "id": "https://example.com/credentials/status/3#94567",
        "type": "StatusList2021Entry",
        "statusPurpose": "revocation",
        "statusListIndex": "94567",
        "statusListCredential": "https://example.com/credentials/status/3"
      },
      {
        "id": "https://example.com/credentials/status/4#94567",
        "type": "StatusList2021Entry",
        "statusPurpose": "suspension",
        "statusListIndex": "94567",
        "statusListCredential": "https://example.com/credentials/status/4"
      }
    ],
    "credentialSubject": {
      "id": "did:example:6789",
      "type": "Person"
    }
}"#;
