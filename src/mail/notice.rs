/// A templated outbound message. Each kind renders a subject plus parallel
/// plain-text and HTML bodies from a fixed template.
#[derive(Debug, Clone)]
pub enum Notice {
    /// Sent to each voter created from a roster upload.
    Registration {
        voter_name: String,
        election_name: String,
        voter_id: String,
        login_url: String,
    },
    /// Sent when a voter initiates login.
    OtpChallenge {
        voter_name: String,
        code: String,
        validity_minutes: i64,
    },
}

impl Notice {
    pub fn subject(&self) -> String {
        match self {
            Self::Registration { election_name, .. } => {
                format!("You have been registered to vote in: {election_name}")
            }
            Self::OtpChallenge { .. } => "VoteXpert - Your Login OTP".to_string(),
        }
    }

    pub fn text_body(&self) -> String {
        match self {
            Self::Registration {
                voter_name,
                election_name,
                voter_id,
                login_url,
            } => format!(
                "VoteXpert - Voter Registration\n\
                 \n\
                 Dear {voter_name},\n\
                 \n\
                 You have been registered as a voter for the following election:\n\
                 \n\
                 Election: {election_name}\n\
                 Your Voter ID: {voter_id}\n\
                 \n\
                 To cast your vote, please visit: {login_url}\n\
                 \n\
                 Use your Voter ID shown above to log in.\n\
                 \n\
                 ---\n\
                 This is an automated message from VoteXpert Secure E-Voting Platform.\n\
                 If you did not expect this email, please ignore it.\n"
            ),
            Self::OtpChallenge {
                voter_name,
                code,
                validity_minutes,
            } => format!(
                "VoteXpert - Login Verification\n\
                 \n\
                 Dear {voter_name},\n\
                 \n\
                 Your one-time password (OTP) for voter login is: {code}\n\
                 \n\
                 This OTP is valid for {validity_minutes} minutes.\n\
                 \n\
                 If you did not request this, please ignore this email.\n"
            ),
        }
    }

    pub fn html_body(&self) -> String {
        match self {
            Self::Registration {
                voter_name,
                election_name,
                voter_id,
                login_url,
            } => format!(
                r#"<html>
<head></head>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">VoteXpert - Voter Registration</h2>
        <p>Dear {voter_name},</p>
        <p>You have been registered as a voter for the following election:</p>
        <div style="background-color: #f3f4f6; padding: 15px; border-radius: 8px; margin: 20px 0;">
            <p style="margin: 0;"><strong>Election:</strong> {election_name}</p>
            <p style="margin: 10px 0 0 0;"><strong>Your Voter ID:</strong> <code style="background-color: #e5e7eb; padding: 2px 8px; border-radius: 4px;">{voter_id}</code></p>
        </div>
        <p>To cast your vote, please visit the voting portal:</p>
        <p style="margin: 20px 0;">
            <a href="{login_url}" style="background-color: #2563eb; color: white; padding: 12px 24px; text-decoration: none; border-radius: 6px; display: inline-block;">Go to Voting Portal</a>
        </p>
        <p>Or copy this link: <a href="{login_url}">{login_url}</a></p>
        <p>Use your <strong>Voter ID</strong> shown above to log in.</p>
        <hr style="border: none; border-top: 1px solid #e5e7eb; margin: 30px 0;">
        <p style="color: #6b7280; font-size: 12px;">
            This is an automated message from VoteXpert Secure E-Voting Platform.<br>
            If you did not expect this email, please ignore it.
        </p>
    </div>
</body>
</html>
"#
            ),
            Self::OtpChallenge {
                voter_name,
                code,
                validity_minutes,
            } => format!(
                r#"<html>
<body style="font-family: Arial, sans-serif; line-height: 1.6; color: #333;">
    <div style="max-width: 600px; margin: 0 auto; padding: 20px;">
        <h2 style="color: #2563eb;">VoteXpert - Login Verification</h2>
        <p>Dear {voter_name},</p>
        <p>Your one-time password (OTP) for voter login is:</p>
        <div style="background-color: #f3f4f6; padding: 20px; border-radius: 8px; margin: 20px 0; text-align: center;">
            <span style="font-size: 32px; font-weight: bold; letter-spacing: 8px; color: #2563eb;">{code}</span>
        </div>
        <p>This OTP is valid for <strong>{validity_minutes} minutes</strong>.</p>
        <p>If you did not request this, please ignore this email.</p>
        <hr style="border: none; border-top: 1px solid #e5e7eb; margin: 30px 0;">
        <p style="color: #6b7280; font-size: 12px;">
            This is an automated message from VoteXpert Secure E-Voting Platform.
        </p>
    </div>
</body>
</html>
"#
            ),
        }
    }
}
