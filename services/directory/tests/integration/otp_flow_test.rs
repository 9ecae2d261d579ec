use chrono::Duration;

use yearbook_directory::error::DirectoryError;
use yearbook_directory::usecase::otp::{RequestOtpInput, RequestOtpUseCase};
use yearbook_domain::identifier::Identifier;
use yearbook_domain::throttle::{OtpPolicy, ThrottleState};

use crate::helpers::{
    MockMailer, MockMemberRepo, STUB_DIGEST_PREFIX, StubHasher, extract_passcode, t0, test_member,
};

fn usecase(
    repo: MockMemberRepo,
    mailer: MockMailer,
) -> RequestOtpUseCase<MockMemberRepo, StubHasher, MockMailer> {
    RequestOtpUseCase {
        repo,
        hasher: StubHasher,
        mailer,
        policy: OtpPolicy::default(),
    }
}

fn email_identifier() -> Identifier {
    Identifier::Email("alice@example.com".to_owned())
}

#[tokio::test]
async fn should_issue_passcode_and_email_it() {
    let member = test_member();
    let repo = MockMemberRepo::new(vec![member.clone()]);
    let mailer = MockMailer::new();
    let uc = usecase(repo.clone(), mailer.clone());

    uc.execute(RequestOtpInput {
        identifier: email_identifier(),
        now: t0(),
    })
    .await
    .unwrap();

    let stored = repo.get(member.id);
    let pending = stored.pending_otp.expect("passcode should be pending");
    assert_eq!(pending.expires_at, t0() + Duration::minutes(10));
    assert_eq!(stored.throttle.request_count, 1);
    assert_eq!(stored.throttle.window_started_at, Some(t0()));

    let mail = mailer.last_sent();
    assert_eq!(mail.recipient, "alice@example.com");
    assert_eq!(mail.subject, "Your profile update passcode");
    let code = extract_passcode(&mail.html_body);
    // only the digest is stored, never the plaintext
    assert_eq!(pending.hash, format!("{STUB_DIGEST_PREFIX}{code}"));
}

#[tokio::test]
async fn should_increment_count_by_one_per_issue() {
    let member = test_member();
    let repo = MockMemberRepo::new(vec![member.clone()]);
    let uc = usecase(repo.clone(), MockMailer::new());

    for expected in 1..=3u32 {
        uc.execute(RequestOtpInput {
            identifier: email_identifier(),
            now: t0() + Duration::minutes(expected as i64),
        })
        .await
        .unwrap();
        assert_eq!(repo.get(member.id).throttle.request_count, expected);
    }
}

#[tokio::test]
async fn should_return_not_found_for_unknown_identifier() {
    let uc = usecase(MockMemberRepo::empty(), MockMailer::new());
    let result = uc
        .execute(RequestOtpInput {
            identifier: Identifier::Email("nobody@example.com".to_owned()),
            now: t0(),
        })
        .await;
    assert!(matches!(result, Err(DirectoryError::MemberNotFound)));
}

#[tokio::test]
async fn should_walk_the_rate_limit_window_example() {
    // count=4 with the window started 10 minutes ago
    let mut member = test_member();
    member.throttle = ThrottleState {
        request_count: 4,
        window_started_at: Some(t0() - Duration::minutes(10)),
    };
    let repo = MockMemberRepo::new(vec![member.clone()]);
    let uc = usecase(repo.clone(), MockMailer::new());

    // a fifth issuance is still allowed
    uc.execute(RequestOtpInput {
        identifier: email_identifier(),
        now: t0(),
    })
    .await
    .unwrap();
    assert_eq!(repo.get(member.id).throttle.request_count, 5);

    // the sixth within the window is rejected, stating when it reopens
    let result = uc
        .execute(RequestOtpInput {
            identifier: email_identifier(),
            now: t0(),
        })
        .await;
    match result {
        Err(DirectoryError::RateLimitExceeded { retry_after_secs }) => {
            assert_eq!(retry_after_secs, 50 * 60);
        }
        other => panic!("expected RateLimitExceeded, got {other:?}"),
    }
    assert_eq!(repo.get(member.id).throttle.request_count, 5);

    // 61 minutes after the window opened it has lapsed: issuance resets to 1
    uc.execute(RequestOtpInput {
        identifier: email_identifier(),
        now: t0() + Duration::minutes(51),
    })
    .await
    .unwrap();
    let stored = repo.get(member.id);
    assert_eq!(stored.throttle.request_count, 1);
    assert_eq!(
        stored.throttle.window_started_at,
        Some(t0() + Duration::minutes(51))
    );
}

#[tokio::test]
async fn should_report_delivery_failure_but_keep_passcode() {
    let member = test_member();
    let repo = MockMemberRepo::new(vec![member.clone()]);
    let uc = usecase(repo.clone(), MockMailer::failing());

    let result = uc
        .execute(RequestOtpInput {
            identifier: email_identifier(),
            now: t0(),
        })
        .await;
    assert!(matches!(result, Err(DirectoryError::DeliveryFailure)));

    // the persisted passcode survives the failed send and stays verifiable
    let stored = repo.get(member.id);
    assert!(stored.pending_otp.is_some());
    assert_eq!(stored.throttle.request_count, 1);
}
