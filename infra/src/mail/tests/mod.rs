mod mock_mail_tests;
mod smtp_tests;
