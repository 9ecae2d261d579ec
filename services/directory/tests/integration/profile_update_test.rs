use chrono::Duration;

use yearbook_directory::domain::types::{PendingOtp, ProfileChanges};
use yearbook_directory::error::DirectoryError;
use yearbook_directory::usecase::otp::{RequestOtpInput, RequestOtpUseCase};
use yearbook_directory::usecase::profile::{
    ApplyProfileInput, ApplyProfileUseCase, VerifyOtpInput, VerifyOtpUseCase,
};
use yearbook_domain::identifier::Identifier;
use yearbook_domain::throttle::OtpPolicy;

use crate::helpers::{
    MockMailer, MockMemberRepo, STUB_DIGEST_PREFIX, StubHasher, extract_passcode, second_member,
    t0, test_member,
};

fn verify_usecase(repo: MockMemberRepo) -> VerifyOtpUseCase<MockMemberRepo, StubHasher> {
    VerifyOtpUseCase {
        repo,
        hasher: StubHasher,
    }
}

fn email_identifier() -> Identifier {
    Identifier::Email("alice@example.com".to_owned())
}

fn pending(code: &str) -> PendingOtp {
    PendingOtp {
        hash: format!("{STUB_DIGEST_PREFIX}{code}"),
        expires_at: t0() + Duration::minutes(10),
    }
}

#[tokio::test]
async fn should_verify_and_consume_passcode_exactly_once() {
    let mut member = test_member();
    member.pending_otp = Some(pending("123456"));
    let repo = MockMemberRepo::new(vec![member.clone()]);
    let uc = verify_usecase(repo.clone());

    let authorization = uc
        .execute(VerifyOtpInput {
            identifier: email_identifier(),
            code: "123456".to_owned(),
            now: t0() + Duration::minutes(1),
        })
        .await
        .unwrap();
    assert_eq!(authorization.member_id(), member.id);
    assert!(repo.get(member.id).pending_otp.is_none());

    // single use: the same passcode no longer has anything to match
    let result = uc
        .execute(VerifyOtpInput {
            identifier: email_identifier(),
            code: "123456".to_owned(),
            now: t0() + Duration::minutes(2),
        })
        .await;
    assert!(matches!(result, Err(DirectoryError::NoPendingOtp)));
}

#[tokio::test]
async fn should_reject_wrong_passcode_without_consuming_pending_state() {
    let mut member = test_member();
    member.pending_otp = Some(pending("123456"));
    let repo = MockMemberRepo::new(vec![member.clone()]);
    let uc = verify_usecase(repo.clone());

    let result = uc
        .execute(VerifyOtpInput {
            identifier: email_identifier(),
            code: "654321".to_owned(),
            now: t0() + Duration::minutes(1),
        })
        .await;
    assert!(matches!(result, Err(DirectoryError::OtpMismatch)));

    // the real passcode stays pending and untouched
    assert_eq!(repo.get(member.id).pending_otp, Some(pending("123456")));
}

#[tokio::test]
async fn should_expire_passcode_and_clear_pending_state() {
    let mut member = test_member();
    member.pending_otp = Some(pending("123456"));
    let repo = MockMemberRepo::new(vec![member.clone()]);
    let uc = verify_usecase(repo.clone());

    // expiry is inclusive: at the boundary the passcode is already dead
    let result = uc
        .execute(VerifyOtpInput {
            identifier: email_identifier(),
            code: "123456".to_owned(),
            now: t0() + Duration::minutes(10),
        })
        .await;
    assert!(matches!(result, Err(DirectoryError::OtpExpired)));
    assert!(repo.get(member.id).pending_otp.is_none());
}

#[tokio::test]
async fn should_fail_verification_when_nothing_is_pending() {
    let repo = MockMemberRepo::new(vec![test_member()]);
    let uc = verify_usecase(repo);

    let result = uc
        .execute(VerifyOtpInput {
            identifier: email_identifier(),
            code: "123456".to_owned(),
            now: t0(),
        })
        .await;
    assert!(matches!(result, Err(DirectoryError::NoPendingOtp)));
}

#[tokio::test]
async fn should_reject_authorization_issued_for_another_member() {
    let mut alice = test_member();
    alice.pending_otp = Some(pending("123456"));
    let bob = second_member();
    let repo = MockMemberRepo::new(vec![alice, bob.clone()]);

    // verification succeeds against Alice's record
    let authorization = verify_usecase(repo.clone())
        .execute(VerifyOtpInput {
            identifier: email_identifier(),
            code: "123456".to_owned(),
            now: t0(),
        })
        .await
        .unwrap();

    // ...but the authorization cannot be spent on Bob's
    let apply = ApplyProfileUseCase { repo };
    let result = apply
        .execute(ApplyProfileInput {
            identifier: Identifier::Email(bob.email.clone()),
            authorization,
            changes: ProfileChanges {
                about: Some("hijacked".to_owned()),
                ..ProfileChanges::default()
            },
            now: t0(),
        })
        .await;
    assert!(matches!(result, Err(DirectoryError::Unauthorized)));
}

#[tokio::test]
async fn should_reject_identity_changes_through_the_flow() {
    let mut member = test_member();
    member.pending_otp = Some(pending("123456"));
    let repo = MockMemberRepo::new(vec![member]);

    let authorization = verify_usecase(repo.clone())
        .execute(VerifyOtpInput {
            identifier: email_identifier(),
            code: "123456".to_owned(),
            now: t0(),
        })
        .await
        .unwrap();

    let apply = ApplyProfileUseCase { repo };
    let result = apply
        .execute(ApplyProfileInput {
            identifier: email_identifier(),
            authorization,
            changes: ProfileChanges {
                email: Some("taken-over@example.com".to_owned()),
                ..ProfileChanges::default()
            },
            now: t0(),
        })
        .await;
    assert!(matches!(result, Err(DirectoryError::Validation(_))));
}

#[tokio::test]
async fn should_round_trip_issue_verify_apply_and_reflect_only_the_changes() {
    let member = test_member();
    let repo = MockMemberRepo::new(vec![member.clone()]);
    let mailer = MockMailer::new();

    // issue → deliver
    RequestOtpUseCase {
        repo: repo.clone(),
        hasher: StubHasher,
        mailer: mailer.clone(),
        policy: OtpPolicy::default(),
    }
    .execute(RequestOtpInput {
        identifier: email_identifier(),
        now: t0(),
    })
    .await
    .unwrap();
    let code = extract_passcode(&mailer.last_sent().html_body);

    // verify with the exact delivered passcode
    let authorization = verify_usecase(repo.clone())
        .execute(VerifyOtpInput {
            identifier: email_identifier(),
            code,
            now: t0() + Duration::minutes(5),
        })
        .await
        .unwrap();

    // apply a partial update
    let updated = ApplyProfileUseCase { repo: repo.clone() }
        .execute(ApplyProfileInput {
            identifier: email_identifier(),
            authorization,
            changes: ProfileChanges {
                skills: Some(vec!["rust".to_owned(), "postgres".to_owned()]),
                github: Some("https://github.com/alice".to_owned()),
                about: Some("hello".to_owned()),
                ..ProfileChanges::default()
            },
            now: t0() + Duration::minutes(5),
        })
        .await
        .unwrap();

    // exactly the changed fields moved; identity and the rest are untouched
    let stored = repo.get(member.id);
    assert_eq!(stored.skills, vec!["rust", "postgres"]);
    assert_eq!(stored.github.as_deref(), Some("https://github.com/alice"));
    assert_eq!(stored.about.as_deref(), Some("hello"));
    assert_eq!(stored.name, member.name);
    assert_eq!(stored.email, member.email);
    assert_eq!(stored.phone, member.phone);
    assert_eq!(stored.roll, member.roll);
    assert_eq!(stored.linkedin, None);
    assert_eq!(stored.updated_at, t0() + Duration::minutes(5));
    assert_eq!(updated.skills, stored.skills);
}
